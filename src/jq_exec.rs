//! jq pre-filtering of input documents (via jaq).
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::Error;

/// Run `filter_src` over `input` and collect every output as JSON.
pub fn select(filter_src: &str, input: &Value) -> Result<Vec<Value>, Error> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(parse_errors)?;
    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| Error::Jq(format!("{e:?}")))?;
        // Val renders as JSON text
        let json = serde_json::from_str(&val.to_string())
            .map_err(|e| Error::Jq(format!("filter produced non-JSON output: {e}")))?;
        out.push(json);
    }
    Ok(out)
}

fn parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> Error {
    let msg = errs
        .iter()
        .map(|(file, err)| format!("parse error: {err:?} in `{}`", file.code))
        .collect::<Vec<_>>()
        .join("\n");
    Error::Jq(msg)
}

fn undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> Error {
    let msg = errs
        .iter()
        .flat_map(|(file, list)| {
            list.iter()
                .map(move |(name, undef)| format!("undefined `{name}`: {undef:?} in `{}`", file.code))
        })
        .collect::<Vec<_>>()
        .join("\n");
    Error::Jq(msg)
}
