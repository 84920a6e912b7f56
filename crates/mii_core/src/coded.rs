/// Declares a closed set of named codes backed by a small integer.
///
/// Every generated enum carries an `Unknown(u8)` variant so reserved or
/// undocumented bit patterns survive decoding instead of failing it.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $raw:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $($variant,)+
            Unknown(u8),
        }

        impl $name {
            pub fn from_raw(raw: u8) -> Self {
                match raw {
                    $($raw => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }

            pub fn raw(&self) -> u8 {
                match *self {
                    $(Self::$variant => $raw,)+
                    Self::Unknown(other) => other,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match *self {
                    $(Self::$variant => $label,)+
                    Self::Unknown(_) => "Unknown",
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match *self {
                    Self::Unknown(v) => write!(f, "Unknown ({})", v),
                    _ => f.write_str(self.as_str()),
                }
            }
        }
    };
}

pub(crate) use coded_enum;
