mod enumeration;
mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)]
// ============================================================================

/// Derive macro that implements the `Record` trait for an entity struct.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Record)]
/// #[record(collection = "books", kind = "book")]
/// struct Book {
///     #[record(key)]
///     isbn: String,
///     title: String,
/// }
/// ```
///
/// - `#[record(collection = "...")]` sets the storage slot name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[record(kind = "...")]` sets the human-readable kind used in log lines.
///   If omitted, defaults to the snake_case struct name.
/// - `#[record(key)]` marks the primary key field. The field type must
///   implement `Display`. If omitted, defaults to a field named `id`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}

// ============================================================================
// #[derive(Enumeration)]
// ============================================================================

/// Derive macro that implements the `Enumeration` trait for a fieldless enum.
///
/// Codes are assigned 1..=N in declaration order.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Enumeration)]
/// enum MovieRating {
///     #[enumeration(label = "General Audiences")]
///     G,
///     #[enumeration(label = "Parental Guidance")]
///     PG,
/// }
/// ```
///
/// `#[enumeration(label = "...")]` sets the display label; the variant
/// name is used when it is omitted.
#[proc_macro_derive(Enumeration, attributes(enumeration))]
pub fn derive_enumeration(input: TokenStream) -> TokenStream {
    enumeration::derive_enumeration(input)
}
