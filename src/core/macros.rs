//! Macro for fieldless step enums.

/// Generate a fieldless step enum together with its `State` implementation.
///
/// Steps that carry data (a field index, a looked-up name) implement
/// `State` by hand; this covers the common case of plain phase tags.
/// The generated enum also gets a `VARIANTS` table in declaration order.
///
/// # Example
///
/// ```
/// use stepform::state_enum;
/// use stepform::core::State;
///
/// state_enum! {
///     pub enum Phase {
///         Playing,
///         Won,
///         Lost,
///     }
///     final: [Won, Lost]
/// }
///
/// assert!(Phase::Won.is_final());
/// assert_eq!(Phase::VARIANTS.len(), 3);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const VARIANTS: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
