#[macro_use]
pub mod pub_macros {

    /// Macro to declare the known filesystems together with their boot-sector signature.
    macro_rules! filesystems {
        (
            $(
                $(#[$docs:meta])*
                ($variant:ident, $label:expr, [$($magic:expr),+ $(,)*])$(,)*
            )+
        ) => {
            /// Filesystem detected from the first bytes of a partition.
            #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
            #[non_exhaustive]
            pub enum FilesystemKind {
                $(
                    $(#[$docs])*
                    $variant,
                )+
            }

            /// Known signatures, checked in order.
            pub const SIGNATURES: &[([u8; SIGNATURE_LEN], FilesystemKind)] = &[
                $(
                    ([$($magic),+], FilesystemKind::$variant),
                )+
            ];

            impl FilesystemKind {
                /// Label used when printing this filesystem.
                pub const fn label(&self) -> &'static str {
                    match self {
                        $(
                            FilesystemKind::$variant => $label,
                        )+
                    }
                }

                /// Boot-sector signature identifying this filesystem.
                pub const fn signature(&self) -> [u8; SIGNATURE_LEN] {
                    match self {
                        $(
                            FilesystemKind::$variant => [$($magic),+],
                        )+
                    }
                }
            }

            impl FromStr for FilesystemKind {
                type Err = String;
                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    $(
                        if s.eq_ignore_ascii_case($label) {
                            return Ok(FilesystemKind::$variant);
                        }
                    )+
                    Err(format!("unknown filesystem label: {s}"))
                }
            }
        }
    }
}
