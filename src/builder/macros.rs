//! Macros for ergonomic state machine construction.

/// Declare a closed state enumeration and implement [`State`](crate::core::State) for it.
///
/// Each variant carries the identifier reported by `name()`; the same
/// identifier is used when the state is serialized.
///
/// # Example
///
/// ```
/// use brigade::core::State;
/// use brigade::state_enum;
///
/// state_enum! {
///     pub enum OvenState {
///         Cold => "COLD",
///         Preheating => "PREHEATING",
///         Ready => "READY",
///     }
/// }
///
/// assert_eq!(OvenState::Preheating.name(), "PREHEATING");
/// assert_eq!(OvenState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $label:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $label)]
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $label),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
