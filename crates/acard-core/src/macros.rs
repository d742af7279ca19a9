/// Declares a closed string enumeration.
///
/// Each variant maps to exactly one wire string. The generated type carries
/// `VALUES` (wire strings in declaration order), `all()`, a `const`
/// `as_str()`, `Display`, and a `FromStr` that rejects anything outside the
/// set with [`CardError::UnknownValue`](crate::error::CardError::UnknownValue).
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Wire values of this enumeration, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            /// Returns every variant in declaration order.
            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }

            /// Returns the wire string for this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err($crate::error::CardError::UnknownValue {
                        enumeration: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}
