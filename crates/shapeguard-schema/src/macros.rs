/// Declare the validated shape of a struct.
///
/// Implements [`FieldValue`](crate::FieldValue) and [`Record`](crate::Record)
/// for an existing struct. Fields are listed in declaration order with their
/// types; the type is checked against the struct field at compile time.
///
/// Supported field attributes:
/// - `#[required]`: report the field when it is empty.
/// - `#[rename = "name"]`: use `name` in error paths instead of the identifier.
///
/// Names here must match the JSON keys serde reads. Required-field errors
/// take their paths from this macro, while type mismatches and the decoder's
/// record-position check use serde's keys. A struct under
/// `#[serde(rename_all = "camelCase")]` (or any serde rename) needs the same
/// key in `#[rename = "..."]`; otherwise the two kinds of error name the
/// field differently and the record-position check never finds the field.
///
/// ```
/// use shapeguard_schema::{record, validate_record};
///
/// #[derive(Default)]
/// struct Address {
///     city: String,
///     zip_code: u32,
/// }
///
/// record!(Address {
///     #[required] city: String,
///     #[required] zip_code: u32,
/// });
///
/// let errors = validate_record(&Address::default());
/// assert_eq!(errors.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    ($name:ident { $( $(#[$key:ident $(= $value:literal)?])* $field:ident : $ty:ty ),* $(,)? }) => {
        impl $crate::FieldValue for $name {
            fn declared_kind() -> $crate::FieldKind {
                $crate::FieldKind::Record
            }

            fn nested_schema() -> ::core::option::Option<$crate::Schema> {
                ::core::option::Option::Some(<Self as $crate::Record>::schema())
            }

            fn registered_schema(
                registry: &$crate::SchemaRegistry,
            ) -> ::core::option::Option<::std::sync::Arc<$crate::Schema>> {
                ::core::option::Option::Some(registry.schema_of::<Self>())
            }

            fn is_empty_value(&self) -> bool {
                false
            }

            fn as_record(&self) -> ::core::option::Option<&dyn $crate::Record> {
                ::core::option::Option::Some(self)
            }
        }

        impl $crate::Record for $name {
            fn record_name(&self) -> &'static str {
                ::core::stringify!($name)
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::FieldDescriptor<'_>> {
                ::std::vec![
                    $(
                        $crate::FieldDescriptor::new::<$ty>(
                            $crate::__record_field_name!($field; $($key $(= $value)?)*),
                            $crate::__record_field_required!($($key $(= $value)?)*),
                            &self.$field,
                        )
                    ),*
                ]
            }

            fn schema() -> $crate::Schema {
                $crate::Schema::new(
                    ::core::stringify!($name),
                    ::std::vec![
                        $(
                            $crate::FieldSpec::of::<$ty>(
                                $crate::__record_field_name!($field; $($key $(= $value)?)*),
                                $crate::__record_field_required!($($key $(= $value)?)*),
                            )
                        ),*
                    ],
                )
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_name {
    ($field:ident;) => {
        ::core::stringify!($field)
    };
    ($field:ident; rename = $name:literal $($rest:tt)*) => {
        $name
    };
    ($field:ident; $other:ident $($rest:tt)*) => {
        $crate::__record_field_name!($field; $($rest)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_field_required {
    () => {
        false
    };
    (required $($rest:tt)*) => {
        true
    };
    (rename = $name:literal $($rest:tt)*) => {
        $crate::__record_field_required!($($rest)*)
    };
}

#[cfg(test)]
mod tests {
    use crate::{FieldKind, Record};

    struct Profile {
        handle: String,
        display_name: Option<String>,
        tags: Vec<String>,
    }

    record!(Profile {
        #[required] #[rename = "userHandle"] handle: String,
        display_name: Option<String>,
        #[rename = "labels"] #[required] tags: Vec<String>,
    });

    struct Empty {}

    record!(Empty {});

    #[test]
    fn attributes_map_to_descriptors() {
        let profile = Profile {
            handle: "ada".to_string(),
            display_name: None,
            tags: Vec::new(),
        };
        let fields = profile.fields();
        let summary: Vec<(&str, bool, FieldKind)> = fields
            .iter()
            .map(|f| (f.name(), f.required(), f.kind()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("userHandle", true, FieldKind::Primitive),
                ("display_name", false, FieldKind::Primitive),
                ("labels", true, FieldKind::PrimitiveSequence),
            ]
        );
        assert_eq!(profile.record_name(), "Profile");
    }

    #[test]
    fn schema_matches_descriptors() {
        let schema = Profile::schema();
        assert_eq!(schema.record, "Profile");
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["userHandle", "display_name", "labels"]);
        assert_eq!(schema.required_fields().count(), 2);
    }

    #[test]
    fn record_without_fields() {
        assert!(Empty {}.fields().is_empty());
        assert!(Empty::schema().fields.is_empty());
    }
}
