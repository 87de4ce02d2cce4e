use crate::codec::{Pack, Unpack};
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

/// Pairs and tuples: each field in declaration order, no prefix.
///
/// One impl is generated per arity; the field list is unrolled at compile time.
macro_rules! impl_tuple_codec {
    ($($name:ident . $idx:tt),+) => {
        impl<$($name: Pack),+> Pack for ($($name,)+) {
            #[inline]
            fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
                $( self.$idx.pack(packer)?; )+
                Ok(())
            }
        }

        impl<$($name: Unpack),+> Unpack for ($($name,)+) {
            #[inline]
            fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
                Ok(($( $name::unpack(unpacker)?, )+))
            }

            fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
                &mut self,
                unpacker: &mut Unpacker<'_, S, E>,
            ) -> Result<()> {
                $( self.$idx.unpack_in_place(unpacker)?; )+
                Ok(())
            }
        }
    };
}

impl_tuple_codec!(A.0);
impl_tuple_codec!(A.0, B.1);
impl_tuple_codec!(A.0, B.1, C.2);
impl_tuple_codec!(A.0, B.1, C.2, D.3);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5, H.6);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9, L.10);
impl_tuple_codec!(A.0, B.1, C.2, D.3, F.4, G.5, H.6, I.7, J.8, K.9, L.10, M.11);
