//! Defines helper macros for generating domain port error enums.
//!
//! Each variant gets a snake_case constructor whose parameters accept
//! anything convertible into the field type, so adapters can write
//! `UserPersistenceError::query(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
    define_port_error! {
        pub enum PantryError {
            Empty => "pantry is empty",
            Missing { ingredient: String } => "missing {ingredient}",
            Short { ingredient: String, grams: u32 } => "short of {ingredient} by {grams}g",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(PantryError::empty(), PantryError::Empty);
        assert_eq!(PantryError::empty().to_string(), "pantry is empty");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = PantryError::missing("ham");
        assert_eq!(err.to_string(), "missing ham");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = PantryError::short("flour", 250_u32);
        assert_eq!(
            err,
            PantryError::Short {
                ingredient: "flour".to_owned(),
                grams: 250,
            }
        );
        assert_eq!(err.to_string(), "short of flour by 250g");
    }
}
