//! # Command Table Macro
//!
//! `define_commands!` turns a list of handler paths into a `ucmd_core`
//! command dictionary at compile time. No heap, no runtime registration:
//! the result is a `const` slice of `CommandSpec` the dispatcher borrows.
//!
//! ## Macro input
//! ```ignore
//! define_commands! {
//!     mod commands;
//!     crate::cmd::led,
//!     crate::cmd::reboot,
//!     "set-baud" => crate::cmd::set_baud,
//! }
//! ```
//! - A bare path registers the handler under its last path segment.
//! - `"name" => path` registers it under an explicit name.
//! - Entries keep the order they are written in; lookup scans in that order.
//!
//! Every handler must have the signature
//! `fn(&[&str]) -> Result<(), ucmd_core::CmdError>`; a mismatch is reported at
//! the offending path.
//!
//! ## Generated module
//! - `COMMANDS: &[CommandSpec<'static>]`
//! - `NUM_COMMANDS`, `MAX_COMMAND_NAME_LEN`
//! - `get_command_names()`
//!
//! Duplicate, empty or whitespace-containing names and the reserved `help`
//! name are compile errors.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Ident, LitStr, Path, Result, Token,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

use ucmd_config::HELP_COMMAND;

/// Parsed macro input: `mod <ident>;` followed by comma-separated entries.
struct CommandMacroInput {
    mod_ident: Ident,
    entries: Punctuated<CommandEntry, Token![,]>,
}

/// `path` or `"name" => path`.
struct CommandEntry {
    name: Option<LitStr>,
    path: Path,
}

impl Parse for CommandMacroInput {
    fn parse(input: ParseStream) -> Result<Self> {
        // Expect: `mod <ident>;`
        input.parse::<Token![mod]>()?;
        let mod_ident: Ident = input.parse()?;
        input.parse::<Token![;]>()?;

        let entries = Punctuated::parse_terminated(input)?;
        Ok(CommandMacroInput { mod_ident, entries })
    }
}

impl Parse for CommandEntry {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            input.parse::<Token![=>]>()?;
            Some(lit)
        } else {
            None
        };
        let path: Path = input.parse()?;
        Ok(CommandEntry { name, path })
    }
}

/// Generate a command dictionary module. See the crate docs for the syntax.
#[proc_macro]
pub fn define_commands(input: TokenStream) -> TokenStream {
    let CommandMacroInput { mod_ident, entries } = parse_macro_input!(input as CommandMacroInput);

    match expand(mod_ident, entries) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// One resolved table row (pre-codegen).
struct CmdEntry {
    name: String,
    span: Span,
    path: Path,
}

fn expand(mod_ident: Ident, entries: Punctuated<CommandEntry, Token![,]>) -> Result<TokenStream2> {
    let mut rows: Vec<CmdEntry> = Vec::new();
    for entry in entries {
        let (name, span) = match &entry.name {
            Some(lit) => (lit.value(), lit.span()),
            None => {
                let name = path_last_ident(&entry.path).ok_or_else(|| {
                    syn::Error::new_spanned(&entry.path, "handler path has no final segment")
                })?;
                let span = entry.path.segments.last().map(|s| s.ident.span()).unwrap_or_else(Span::call_site);
                (name, span)
            }
        };
        rows.push(CmdEntry { name, span, path: entry.path });
    }

    for (pos, row) in rows.iter().enumerate() {
        let earlier: Vec<&str> = rows[..pos].iter().map(|r| r.name.as_str()).collect();
        if let Err(msg) = check_name(&row.name, &earlier) {
            return Err(syn::Error::new(row.span, msg));
        }
    }

    let num_commands = rows.len();
    let max_name_len = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);

    let names: Vec<LitStr> = rows.iter().map(|r| LitStr::new(&r.name, r.span)).collect();

    // Compile-time signature check: reported at the handler path on mismatch.
    let sig_checks: Vec<TokenStream2> = rows
        .iter()
        .map(|r| {
            let path = &r.path;
            quote! {
                const _: fn(&[&str]) -> ::core::result::Result<(), ::ucmd_core::CmdError> = #path;
            }
        })
        .collect();

    let spec_inits: Vec<TokenStream2> = rows
        .iter()
        .zip(names.iter())
        .map(|(r, name)| {
            let path = &r.path;
            quote! { ::ucmd_core::CommandSpec::new(#name, &#path) }
        })
        .collect();

    Ok(quote! {
        #[allow(non_upper_case_globals, unused_imports)]
        pub mod #mod_ident {
            //! Generated by `define_commands!`.
            use super::*;

            #( #sig_checks )*

            /// Number of registered commands.
            pub const NUM_COMMANDS: usize = #num_commands;

            /// Longest registered name, in bytes.
            pub const MAX_COMMAND_NAME_LEN: usize = #max_name_len;

            /// Registered names in registration order.
            pub static COMMAND_NAMES: [&str; #num_commands] = [ #( #names ),* ];

            /// The command dictionary, in registration order.
            pub const COMMANDS: &[::ucmd_core::CommandSpec<'static>] = &[
                #( #spec_inits ),*
            ];

            /// Registered names in registration order. No allocations.
            #[inline(always)]
            pub fn get_command_names() -> &'static [&'static str] {
                &COMMAND_NAMES
            }
        }
    })
}

/// Last path segment (function ident) as a `String`, without a raw `r#` prefix.
fn path_last_ident(p: &Path) -> Option<String> {
    p.segments.last().map(|s| {
        let name = s.ident.to_string();
        match name.strip_prefix("r#") {
            Some(raw) => raw.to_string(),
            None => name,
        }
    })
}

/// Reject names the runtime parser could never match or would shadow.
fn check_name(name: &str, earlier: &[&str]) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err("command name is empty".into());
    }
    if name.chars().any(char::is_whitespace) {
        return Err(format!("command name `{}` contains whitespace", name));
    }
    if name == HELP_COMMAND {
        return Err(format!("`{}` is reserved for the dictionary listing", HELP_COMMAND));
    }
    if earlier.contains(&name) {
        return Err(format!("command `{}` is registered twice", name));
    }
    Ok(())
}
