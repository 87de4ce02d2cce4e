//! # PacketBuffer Derive Macros
//!
//! This crate provides `#[derive(Packable)]` for `packetbuf`. It implements
//! `Pack` and `Unpack` for structs (fields in declaration order) and for
//! fieldless enums with an explicit integer `#[repr]` (the discriminant).
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, Generics, Ident, LitStr, Member, Type,
    WherePredicate, parse_macro_input, parse_quote,
};

/// Derives `packetbuf::Pack` and `packetbuf::Unpack`.
///
/// Field attributes:
/// * `#[packetbuf(with = "path::To::Codec")]` encodes the field through an
///   override codec implementing `packetbuf::Codec<FieldType>`.
/// * `#[packetbuf(skip)]` leaves the field off the wire; decoding fills it
///   with `Default::default()`.
#[proc_macro_derive(Packable, attributes(packetbuf))]
pub fn derive_packable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let expanded = match &input.data {
        Data::Struct(ds) => collect_fields(&ds.fields).map(|fields| generate_struct(&input, &fields)),
        Data::Enum(de) => generate_enum(&input, de),
        Data::Union(_) => Err(syn::Error::new(
            input.ident.span(),
            "Packable does not support unions",
        )),
    };

    match expanded {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => e.to_compile_error().into(),
    }
}

// --- Internal Data Structures ---
struct FieldSpec {
    member: Member,
    binding: Ident,
    ty: Type,
    codec: Option<syn::Path>,
    skip: bool,
}

const SKIP_WITH_CONFLICT: &str = "`skip` and `with` cannot be combined on one field";

/// Parses field attributes. Returns (codec override, skip).
fn parse_attributes(attrs: &[Attribute]) -> syn::Result<(Option<syn::Path>, bool)> {
    let mut codec = None;
    let mut skip = false;

    for attr in attrs {
        if attr.path().is_ident("packetbuf") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    if codec.is_some() {
                        return Err(meta.error(SKIP_WITH_CONFLICT));
                    }
                    skip = true;
                    return Ok(());
                }

                if meta.path.is_ident("with") {
                    if skip {
                        return Err(meta.error(SKIP_WITH_CONFLICT));
                    }
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    codec = Some(s.parse::<syn::Path>()?);
                    return Ok(());
                }
                Err(meta.error("Unknown packetbuf attribute key. Supported: with, skip"))
            })?;
        }
    }

    Ok((codec, skip))
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldSpec>> {
    let mut specs = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let (codec, skip) = parse_attributes(&field.attrs)?;
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(index.into()),
        };
        specs.push(FieldSpec {
            member,
            binding: format_ident!("__field{}", index),
            ty: field.ty.clone(),
            codec,
            skip,
        });
    }
    Ok(specs)
}

/// Adds one where-predicate per field so generic parameters only need the
/// bounds their fields actually use.
fn bounded_generics(
    generics: &Generics,
    fields: &[FieldSpec],
    predicate: impl Fn(&FieldSpec) -> Option<WherePredicate>,
) -> Generics {
    let mut generics = generics.clone();
    if generics.type_params().next().is_none() {
        return generics;
    }
    let clause = generics.make_where_clause();
    for field in fields {
        if let Some(pred) = predicate(field) {
            clause.predicates.push(pred);
        }
    }
    generics
}

// --- Generator: structs ---

fn generate_struct(input: &DeriveInput, fields: &[FieldSpec]) -> TokenStream2 {
    let impl_pack = generate_pack(&input.ident, &input.generics, fields);
    let impl_unpack = generate_unpack(&input.ident, &input.generics, fields);
    quote! {
        #impl_pack
        #impl_unpack
    }
}

fn generate_pack(name: &Ident, generics: &Generics, fields: &[FieldSpec]) -> TokenStream2 {
    let generics = bounded_generics(generics, fields, |f| {
        let ty = &f.ty;
        match (&f.codec, f.skip) {
            (_, true) => None,
            (Some(codec), _) => Some(parse_quote!(#codec: ::packetbuf::Codec<#ty>)),
            (None, _) => Some(parse_quote!(#ty: ::packetbuf::Pack)),
        }
    });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let pack_stmts = fields.iter().filter(|f| !f.skip).map(|f| {
        let member = &f.member;
        let ty = &f.ty;
        match &f.codec {
            Some(codec) => quote! { packer.pack_with::<#codec, #ty>(&self.#member)?; },
            None => quote! { packer.pack(&self.#member)?; },
        }
    });

    quote! {
        impl #impl_generics ::packetbuf::Pack for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn pack<__PacketSink, __PacketOrder>(
                &self,
                packer: &mut ::packetbuf::Packer<'_, __PacketSink, __PacketOrder>,
            ) -> ::packetbuf::Result<()>
            where
                __PacketSink: ::packetbuf::io::Sink + ?Sized,
                __PacketOrder: ::packetbuf::endian::Endianness,
            {
                #(#pack_stmts)*
                Ok(())
            }
        }
    }
}

fn generate_unpack(name: &Ident, generics: &Generics, fields: &[FieldSpec]) -> TokenStream2 {
    let generics = bounded_generics(generics, fields, |f| {
        let ty = &f.ty;
        match (&f.codec, f.skip) {
            (_, true) => Some(parse_quote!(#ty: ::core::default::Default)),
            (Some(codec), _) => Some(parse_quote!(#codec: ::packetbuf::Codec<#ty>)),
            (None, _) => Some(parse_quote!(#ty: ::packetbuf::Unpack)),
        }
    });
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let read_fields = fields.iter().map(|f| {
        let binding = &f.binding;
        let ty = &f.ty;
        match (&f.codec, f.skip) {
            (_, true) => quote! { let #binding: #ty = ::core::default::Default::default(); },
            (Some(codec), _) => quote! { let #binding = unpacker.unpack_with::<#codec, #ty>()?; },
            (None, _) => quote! { let #binding = unpacker.unpack::<#ty>()?; },
        }
    });

    let fill_fields = fields.iter().map(|f| {
        let member = &f.member;
        let ty = &f.ty;
        match (&f.codec, f.skip) {
            (_, true) => quote! { self.#member = ::core::default::Default::default(); },
            (Some(codec), _) => {
                quote! { unpacker.unpack_into_with::<#codec, #ty>(&mut self.#member)?; }
            }
            (None, _) => quote! { unpacker.unpack_into(&mut self.#member)?; },
        }
    });

    let members = fields.iter().map(|f| &f.member);
    let bindings = fields.iter().map(|f| &f.binding);

    quote! {
        impl #impl_generics ::packetbuf::Unpack for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn unpack<__PacketSource, __PacketOrder>(
                unpacker: &mut ::packetbuf::Unpacker<'_, __PacketSource, __PacketOrder>,
            ) -> ::packetbuf::Result<Self>
            where
                __PacketSource: ::packetbuf::io::Source + ?Sized,
                __PacketOrder: ::packetbuf::endian::Endianness,
            {
                #(#read_fields)*
                Ok(Self { #(#members: #bindings),* })
            }

            #[allow(unused_variables)]
            fn unpack_in_place<__PacketSource, __PacketOrder>(
                &mut self,
                unpacker: &mut ::packetbuf::Unpacker<'_, __PacketSource, __PacketOrder>,
            ) -> ::packetbuf::Result<()>
            where
                __PacketSource: ::packetbuf::io::Source + ?Sized,
                __PacketOrder: ::packetbuf::endian::Endianness,
            {
                #(#fill_fields)*
                Ok(())
            }
        }
    }
}

// --- Generator: fieldless enums ---

const INTEGER_REPRS: [&str; 8] = ["u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64"];

/// Finds the integer type named by `#[repr(..)]`, ignoring `C` and `align`.
fn parse_repr(name: &Ident, attrs: &[Attribute]) -> syn::Result<Ident> {
    let mut repr = None;
    for attr in attrs {
        if attr.path().is_ident("repr") {
            attr.parse_nested_meta(|meta| {
                if let Some(ident) = meta.path.get_ident() {
                    if INTEGER_REPRS.contains(&ident.to_string().as_str()) {
                        repr = Some(ident.clone());
                    }
                }
                // Skip arguments such as `align(8)`.
                if meta.input.peek(syn::token::Paren) {
                    let _content;
                    syn::parenthesized!(_content in meta.input);
                }
                Ok(())
            })?;
        }
    }
    repr.ok_or_else(|| {
        syn::Error::new(
            name.span(),
            "Packable enums need an explicit integer repr, e.g. #[repr(u8)]. \
             Supported: u8, u16, u32, u64, i8, i16, i32, i64",
        )
    })
}

fn generate_enum(input: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    if data.variants.is_empty() {
        return Err(syn::Error::new(
            name.span(),
            "Packable cannot be derived for an enum without variants",
        ));
    }
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Packable only supports fieldless enum variants",
            ));
        }
    }
    let repr = parse_repr(name, &input.attrs)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let variants: Vec<&Ident> = data.variants.iter().map(|v| &v.ident).collect();
    let encode_arms = variants.iter().map(|v| quote! { Self::#v => Self::#v as #repr, });
    let decode_checks = variants.iter().map(|v| {
        quote! {
            if raw == Self::#v as #repr {
                return Ok(Self::#v);
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::packetbuf::Pack for #name #ty_generics #where_clause {
            fn pack<__PacketSink, __PacketOrder>(
                &self,
                packer: &mut ::packetbuf::Packer<'_, __PacketSink, __PacketOrder>,
            ) -> ::packetbuf::Result<()>
            where
                __PacketSink: ::packetbuf::io::Sink + ?Sized,
                __PacketOrder: ::packetbuf::endian::Endianness,
            {
                let raw: #repr = match self {
                    #(#encode_arms)*
                };
                packer.pack(&raw)?;
                Ok(())
            }
        }

        impl #impl_generics ::packetbuf::Unpack for #name #ty_generics #where_clause {
            fn unpack<__PacketSource, __PacketOrder>(
                unpacker: &mut ::packetbuf::Unpacker<'_, __PacketSource, __PacketOrder>,
            ) -> ::packetbuf::Result<Self>
            where
                __PacketSource: ::packetbuf::io::Source + ?Sized,
                __PacketOrder: ::packetbuf::endian::Endianness,
            {
                let raw: #repr = unpacker.unpack()?;
                #(#decode_checks)*
                Err(::packetbuf::PacketError::Format(format!(
                    "unknown discriminant {} for enum {}",
                    raw,
                    stringify!(#name)
                )))
            }
        }
    })
}
