//! Minimal CLI: JSON → (dart | describe)
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::{json, Value};

use crate::context::GenerationContext;
use crate::error::Error;
use crate::inference::generate;
use crate::ir::ClassModel;
use crate::naming::file_stem;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer types from example JSON and emit immutable Dart data classes
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate Dart classes
    Dart(DartOut),
    /// print the inferred classes and field types as JSON
    Describe(DescribeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; several results become one array
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct GenerationSettings {
    /// JSON config file with generation settings (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// root class name (defaults to the input file stem)
    #[arg(long)]
    root_class: Option<String>,

    /// spaces per indentation level
    #[arg(long)]
    indent: Option<usize>,

    /// guard every fromJson assignment with a runtime type check
    #[arg(long)]
    check_type: bool,

    /// type for fields only ever seen as null
    #[arg(long)]
    null_type: Option<String>,

    /// emit pre-null-safety types (no `?`)
    #[arg(long)]
    no_null_safety: bool,

    /// emit a copyWith method
    #[arg(long)]
    copy_with: bool,

    /// emit a static fromList factory
    #[arg(long)]
    from_list: bool,

    /// infer array element classes from the first element only
    #[arg(long)]
    first_element_only: bool,

    /// read numbers as `num` and convert to int/double
    #[arg(long)]
    use_num: bool,

    /// package path for imports between generated files (e.g. my_app/models)
    #[arg(long)]
    package: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct DartOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation: GenerationSettings,

    /// output .dart file with every class (stdout if omitted)
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// write one .dart file per class into this directory
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DescribeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    generation: GenerationSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One input document, ready for generation.
#[derive(Debug)]
struct Document {
    path: PathBuf,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load(&self) -> Result<Vec<Document>, Error> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut docs = Vec::with_capacity(source_paths.len());
        for path in source_paths {
            let source = std::fs::read_to_string(&path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            let mut value = serde_json::from_str::<Value>(&source).map_err(|source| Error::Json {
                path: path.clone(),
                source,
            })?;
            if let Some(pointer) = self.json_pointer.as_ref() {
                value = value.pointer(pointer).cloned().ok_or_else(|| Error::Pointer {
                    pointer: pointer.clone(),
                    path: path.clone(),
                })?;
            }
            if let Some(jq_expr) = self.jq_expr.as_ref() {
                let mut results = crate::jq_exec::select(jq_expr, &value)?;
                value = match results.len() {
                    0 => {
                        tracing::warn!(path = %path.display(), "jq filter produced no output, skipping");
                        continue;
                    }
                    1 => results.remove(0),
                    _ => Value::Array(results),
                };
            }
            docs.push(Document { path, value });
        }
        Ok(docs)
    }
}

impl GenerationSettings {
    fn context(&self) -> Result<GenerationContext, Error> {
        let mut ctx = match self.config.as_ref() {
            Some(path) => GenerationContext::load(path)?,
            None => GenerationContext::default(),
        };
        if let Some(indent) = self.indent {
            ctx.indent_width = indent;
        }
        if let Some(null_type) = self.null_type.as_ref() {
            ctx.null_value_data_type = null_type.clone();
        }
        if let Some(package) = self.package.as_ref() {
            ctx.package_import = Some(package.clone());
        }
        ctx.should_check_type |= self.check_type;
        ctx.null_safety &= !self.no_null_safety;
        ctx.include_copy_with |= self.copy_with;
        ctx.include_from_list |= self.from_list;
        ctx.merge_array_approach &= !self.first_element_only;
        ctx.use_num |= self.use_num;
        Ok(ctx)
    }

    fn root_name(&self, doc: &Document) -> String {
        self.root_class.clone().unwrap_or_else(|| {
            doc.path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Root".to_string())
        })
    }

    /// Independent runs per document, in parallel; results keep input order.
    fn generate_all(&self, docs: &[Document]) -> Result<Vec<Vec<ClassModel>>, Error> {
        let ctx = self.context()?;
        Ok(docs
            .par_iter()
            .map(|doc| {
                let models = generate(&ctx, &self.root_name(doc), &doc.value);
                tracing::info!(path = %doc.path.display(), classes = models.len(), "generated");
                models
            })
            .collect())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Dart(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let docs = target.input_settings.load()?;
                let runs = target.generation.generate_all(&docs)?;
                check_distinct_classes(&docs, &runs)?;
                match target.out_dir.as_ref() {
                    Some(dir) => write_class_files(dir, &runs)?,
                    None => {
                        let src = runs
                            .iter()
                            .flatten()
                            .map(|m| m.source_text.as_str())
                            .collect::<Vec<_>>()
                            .join("\n");
                        write_output(target.out.as_deref(), &src)?;
                    }
                }
            }
            Command::Describe(target) => {
                let docs = target.input_settings.load()?;
                let runs = target.generation.generate_all(&docs)?;
                let view = docs
                    .iter()
                    .zip(&runs)
                    .map(|(doc, models)| json!({ "input": doc.path, "classes": models }))
                    .collect::<Vec<_>>();
                let src = serde_json::to_string_pretty(&view).context("failed to render description")?;
                write_output(target.out.as_deref(), &src)?;
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, src: &str) -> Result<(), Error> {
    let Some(out) = out else {
        println!("{src}");
        return Ok(());
    };
    write_file(out, src)?;
    eprintln!("{} {}", "wrote".green().bold(), out.display());
    Ok(())
}

/// Classes from different inputs land in one file or directory, so their names must not repeat.
fn check_distinct_classes(docs: &[Document], runs: &[Vec<ClassModel>]) -> Result<(), Error> {
    let mut owner: HashMap<&str, &Path> = HashMap::new();
    for (doc, models) in docs.iter().zip(runs) {
        for model in models {
            if let Some(first) = owner.insert(model.class_name.as_str(), doc.path.as_path()) {
                return Err(Error::ClassClash {
                    class: model.class_name.clone(),
                    first: first.to_path_buf(),
                    second: doc.path.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Target path and contents per class; two classes mapping to one file is an error.
fn class_files(dir: &Path, runs: &[Vec<ClassModel>]) -> Result<Vec<(PathBuf, String)>, Error> {
    let mut owner: HashMap<PathBuf, &str> = HashMap::new();
    let mut files = Vec::new();
    for model in runs.iter().flatten() {
        let path = dir.join(format!("{}.dart", file_stem(&model.class_name)));
        if let Some(first) = owner.insert(path.clone(), model.class_name.as_str()) {
            return Err(Error::FileClash {
                first: first.to_string(),
                second: model.class_name.clone(),
                path,
            });
        }
        let src = match model.auxiliary_imports.as_deref() {
            Some(imports) => format!("{imports}\n{}", model.source_text),
            None => model.source_text.clone(),
        };
        files.push((path, src));
    }
    Ok(files)
}

fn write_class_files(dir: &Path, runs: &[Vec<ClassModel>]) -> Result<(), Error> {
    let files = class_files(dir, runs)?;
    for (path, src) in &files {
        write_file(path, src)?;
    }
    eprintln!("{} {} files to {}", "wrote".green().bold(), files.len(), dir.display());
    Ok(())
}

fn write_file(path: &Path, src: &str) -> Result<(), Error> {
    let io_err = |source| Error::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, src).map_err(io_err)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let entries = glob::glob(pattern).map_err(|e| Error::Pattern(format!("{pattern}: {e}")))?;
        let before = out.len();
        for entry in entries {
            out.push(entry.map_err(|e| Error::Pattern(e.to_string()))?);
        }
        if out.len() == before {
            return Err(Error::Pattern(format!("glob pattern matched no files: {pattern}")));
        }
    }

    Ok(out)
}
