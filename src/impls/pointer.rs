use std::rc::Rc;
use std::sync::Arc;

use crate::codec::{Pack, Unpack};
use crate::endian::Endianness;
use crate::error::Result;
use crate::io::{Sink, Source};
use crate::packer::Packer;
use crate::unpacker::Unpacker;

// References and smart pointers are transparent on the wire.

macro_rules! impl_transparent_pack {
    ($($ptr:ty),*) => {
        $(
            impl<T: Pack + ?Sized> Pack for $ptr {
                #[inline]
                fn pack<S: Sink + ?Sized, E: Endianness>(&self, packer: &mut Packer<'_, S, E>) -> Result<()> {
                    (**self).pack(packer)
                }
            }
        )*
    };
}

impl_transparent_pack!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Unpack> Unpack for Box<T> {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        T::unpack(unpacker).map(Box::new)
    }

    #[inline]
    fn unpack_in_place<S: Source + ?Sized, E: Endianness>(
        &mut self,
        unpacker: &mut Unpacker<'_, S, E>,
    ) -> Result<()> {
        (**self).unpack_in_place(unpacker)
    }
}

impl<T: Unpack> Unpack for Rc<T> {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        T::unpack(unpacker).map(Rc::new)
    }
}

impl<T: Unpack> Unpack for Arc<T> {
    #[inline]
    fn unpack<S: Source + ?Sized, E: Endianness>(unpacker: &mut Unpacker<'_, S, E>) -> Result<Self> {
        T::unpack(unpacker).map(Arc::new)
    }
}
