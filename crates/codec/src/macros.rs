//! Simple macros for basic codec impls.

/// Generates a `Codec` impl for a wrapper type, encoded exactly like the type
/// it wraps.
#[macro_export]
macro_rules! impl_wrapper_codec {
    ($this:ty => $target:ty) => {
        impl $crate::Codec for $this {
            fn decode(dec: &mut impl $crate::Decoder) -> Result<Self, $crate::CodecError> {
                <$target as $crate::Codec>::decode(dec).map(Self)
            }

            fn encode(&self, enc: &mut impl $crate::Encoder) -> Result<(), $crate::CodecError> {
                <$target as $crate::Codec>::encode(&self.0, enc)
            }
        }
    };
}

/// Generates a record struct with `Codec` and `Describe` impls, assuming each
/// of its fields implements both.  Fields go on the wire in declaration order,
/// and the record shape is named after the struct.
///
/// Also generates a `new` constructor and a getter per field.
#[macro_export]
macro_rules! impl_type_flat_struct {
    {
        $( #[ $sattr:meta ] )*
        $v:vis struct $name:ident {
            $(
                $( #[ $fattr:meta ] )*
                $fname:ident : $fty:ty,
            )*
        }
    } => {
        $( #[ $sattr ] )*
        $v struct $name {
            $(
                $( #[ $fattr ] )*
                $fname : $fty,
            )*
        }

        impl $name {
            $v fn new($( $fname : $fty ),*) -> Self {
                Self { $( $fname ),* }
            }

            $(
                $v fn $fname(&self) -> &$fty {
                    &self.$fname
                }
            )*
        }

        impl $crate::Codec for $name {
            fn decode(dec: &mut impl $crate::Decoder) -> Result<Self, $crate::CodecError> {
                $(
                    let $fname = <$fty as $crate::Codec>::decode(dec)?;
                )*
                Ok(Self::new($($fname),*))
            }

            fn encode(&self, enc: &mut impl $crate::Encoder) -> Result<(), $crate::CodecError> {
                $(<$fty as $crate::Codec>::encode(&self.$fname, enc)?;)*
                Ok(())
            }
        }

        impl $crate::Describe for $name {
            fn shape() -> $crate::Shape {
                $crate::RecordShape::new(stringify!($name))
                    $( .field(stringify!($fname), <$fty as $crate::Describe>::shape()) )*
                    .into()
            }
        }
    }
}
