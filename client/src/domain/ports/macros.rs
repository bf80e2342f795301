//! Helper macro generating port error enums with snake_case constructors.
//!
//! Each variant gets a constructor accepting `impl Into<T>` per field, so
//! adapters can write `TransportError::timeout(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::super::{SessionStorageError, TransportError};

    #[rstest]
    #[case(TransportError::transport("connection reset"), "backend transport failed: connection reset")]
    #[case(TransportError::timeout("after 10s"), "backend request timed out: after 10s")]
    #[case(TransportError::invalid_request("bad url"), "backend request invalid: bad url")]
    fn transport_constructors_fill_the_message(#[case] err: TransportError, #[case] text: &str) {
        assert_eq!(err.to_string(), text);
    }

    #[rstest]
    fn constructors_accept_owned_and_borrowed_strings() {
        let owned = SessionStorageError::corrupt(String::from("truncated json"));
        let borrowed = SessionStorageError::corrupt("truncated json");
        assert_eq!(owned, borrowed);
        assert_eq!(
            borrowed,
            SessionStorageError::Corrupt {
                message: "truncated json".to_owned()
            }
        );
    }
}
