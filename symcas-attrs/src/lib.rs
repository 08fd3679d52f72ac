mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `symcas_error::ErrorKind` trait for the given struct.
///
/// The information of the error is customized with the `error` attribute:
/// ```
/// use symcas_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not a symbol", self.found),
///     labels = ["this expression"],
///     help = "only symbols can be used here",
/// )]
/// pub struct ExpectedSymbol {
///     pub found: String,
/// }
/// ```
///
/// | Tag       | Description                                                                  |
/// | --------- | ---------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error when it is displayed.          |
/// | `labels`  | An array of label texts, one per span the error is reported with.            |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression. `message` and `help` should evaluate to something that
/// implements [`ToString`], and `labels` to something iterable over such values. The expressions
/// are evaluated with `self` in scope.
///
/// The crate using the derive must depend on `ariadne` and `symcas-error`.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl symcas_error::ErrorKind for #name {
            #target
        }
    }.into()
}
