use proc_macro::TokenStream;
use quote::quote;

/// Turns a handler function into a unit struct implementing
/// `crate::commands::TrackerCommand`, registered under the given name.
///
/// ```ignore
/// #[command("goal_reg")]
/// pub fn goal_reg(tracker: &mut MatchTracker, args: GoalArgs) -> ServiceResult<()> { .. }
/// ```
#[proc_macro_attribute]
pub fn command(attr: TokenStream, input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::ItemFn);
    let attr = syn::parse_macro_input!(attr as syn::LitStr);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let ident = &input.sig.ident;

    let mut inputs = input.sig.inputs;
    let arg_count = inputs.iter().len();
    if arg_count < 1 {
        panic!("Command Handler needs at least the tracker");
    } else if arg_count == 1 {
        let tokens: TokenStream = "_: crate::commands::NoArgs".parse().unwrap();
        let fn_arg = syn::parse_macro_input!(tokens as syn::FnArg);
        inputs.push(fn_arg);
    }

    let args_arg = match inputs.get(1).expect("Wrong number of arguments") {
        syn::FnArg::Typed(arg) => arg,
        _ => panic!("Wrong type of arguments"),
    };
    let args_type = &args_arg.ty;
    let output = input.sig.output;

    let body = input.block;

    TokenStream::from(quote! {
        #(#attrs)*
        #[allow(non_camel_case_types)]
        #vis struct #ident;

        impl crate::commands::TrackerCommand<#args_type> for #ident {
            const NAME: &'static str = #attr;

            fn handle(#inputs) #output {
                #body
            }
        }
    })
}
