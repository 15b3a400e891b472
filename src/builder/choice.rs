//! `ChoiceBuilder<T>` — selects a variant by the incoming TLV's identifier.
//! Declared via the [`choice_builder`] macro rather than hand-rolled per
//! type, since every CHOICE's dispatch has the identical shape: try each
//! variant's `matches` in declared order, build the first hit.

/// Declares a CHOICE type and its `Builder` impl in one shot.
///
/// ```ignore
/// choice_builder! {
///     pub enum GeneralNameValue {
///         Rfc822Name(PrimitiveBuilder<Ia5String>),
///         DnsName(PrimitiveBuilder<Ia5String>),
///         Uri(PrimitiveBuilder<Ia5String>),
///     }
/// }
/// ```
///
/// generates an enum with one variant per arm (holding that arm's
/// `Builder::Output`) plus a `Builder` impl whose `matches` is the
/// disjunction of every variant's `matches`, and whose `build` tries each
/// variant in order. An unmatched identifier is `UnsupportedFormat` unless
/// the type declares its own fallback `RawData` arm.
#[macro_export]
macro_rules! choice_builder {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident($builder:ty)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($variant(<$builder as $crate::builder::Builder>::Output)),+
        }

        impl $crate::builder::Builder for $name {
            type Output = Self;

            fn matches(identifier: $crate::identifier::Identifier) -> bool {
                $(<$builder as $crate::builder::Builder>::matches(identifier))||+
            }

            fn build(
                identifier: $crate::identifier::Identifier,
                content: &[u8],
                depth: usize,
            ) -> Result<Self, $crate::error::DecodeError> {
                $(
                    if <$builder as $crate::builder::Builder>::matches(identifier) {
                        return Ok($name::$variant($crate::builder::build_at::<$builder>(identifier, content, depth)?));
                    }
                )+
                Err($crate::error::DecodeError::unsupported_format(concat!(
                    "no matching CHOICE variant for ", stringify!($name)
                )))
            }
        }
    };
}
