mod error_kind;

use error_kind::ErrorKindInput;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait for the given struct.
///
/// The report shown to the user is described by the `error` attribute:
///
/// ```ignore
/// use arbor_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of file", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | Label texts paired with the error's spans in order; `""` leaves a span bare. |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression evaluated with the members of the struct in scope, so fields
/// can be used in the expression (tuple structs are not supported). The deriving module must
/// have the `ErrorKind` trait itself in scope.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ErrorKindInput);
    let name = &input.name;
    quote! {
        impl ErrorKind for #name {
            #input
        }
    }.into()
}
