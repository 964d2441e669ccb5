use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// One `key = value` entry inside the `error` attribute.
struct SpecEntry {
    key: Ident,
    value: Expr,
}

impl Parse for SpecEntry {
    fn parse(input: ParseStream) -> Result<Self> {
        let key = input.parse()?;
        input.parse::<Token![=]>()?;
        let value = input.parse()?;
        Ok(Self { key, value })
    }
}

/// The report description collected from the `error` attribute: the headline message, one label
/// expression per span, and optional help text.
#[derive(Default)]
pub struct ReportSpec {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl Parse for ReportSpec {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut spec = ReportSpec::default();
        for entry in Punctuated::<SpecEntry, Token![,]>::parse_terminated(input)? {
            let key = entry.key.to_string();
            match key.as_str() {
                "message" => spec.message = Some(entry.value),
                "labels" => spec.labels = Some(entry.value),
                "help" => spec.help = Some(entry.value),
                _ => {
                    let msg = format!("unknown tag `{}`", key);
                    return Err(syn::Error::new_spanned(entry.key, msg));
                },
            }
        }
        Ok(spec)
    }
}

/// Binds each named field of the deriving struct, so the attribute expressions can refer to
/// fields by bare name. Unit structs have nothing to bind; tuple structs have no usable names
/// and are rejected.
fn field_bindings(name: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { let #name { #(#names),* } = self; }
        },
        Fields::Unit => TokenStream2::new(),
        Fields::Unnamed(_) => quote_spanned! {
            name.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs");
        },
    }
}

/// The struct the `ErrorKind` derive was applied to.
pub struct ErrorKindInput {
    pub name: Ident,
    pub fields: Fields,
    pub spec: ReportSpec,
}

impl Parse for ErrorKindInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let item = input.parse::<ItemStruct>()?;

        let spec = match attrs.iter().find(|attr| attr.path().is_ident("error")) {
            Some(attr) => attr.parse_args::<ReportSpec>()?,
            None => ReportSpec::default(),
        };

        Ok(Self {
            name: item.ident,
            fields: item.fields,
            spec,
        })
    }
}

impl ToTokens for ErrorKindInput {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let bindings = field_bindings(&self.name, &self.fields);
        let message = self.spec.message.as_ref();
        let labels = self.spec.labels.as_ref();
        let help = self.spec.help.as_ref().map(|expr| quote! { builder.set_help(#expr); });

        tokens.extend(quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> arbor_error::ErrorReport<'a> {
                #[allow(unused_variables)]
                #bindings

                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, spans[0].start)
                    .with_message(#message)
                    .with_labels(
                        #labels
                            .into_iter()
                            .zip(spans.iter())
                            .map(|(text, span)| {
                                let label = ariadne::Label::new((src_id, span.clone()))
                                    .with_color(arbor_error::EXPR);

                                // an empty label marks the span without a message next to it
                                if text.is_empty() {
                                    label
                                } else {
                                    label.with_message(text)
                                }
                            })
                            .collect::<Vec<_>>()
                    );

                #help
                builder.finish()
            }
        });
    }
}
