//! Discovering and loading the Go files of one package directory.

use crate::build_context::BuildContext;
use crate::state::{BindError, BinderState};
use crate::symbols::SymbolTable;
use enumgen_common::{LineMap, Location};
use enumgen_parser::{ConstraintError, ParseError, SourceFile, file_constraint, parse_source_file};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info_span};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("package {} not found", .0.display())]
    PackageNotFound(PathBuf),
    #[error("no buildable Go source files in {}", .0.display())]
    NoGoFiles(PathBuf),
    #[error("found packages {first} ({first_file}) and {second} ({second_file}) in {}", .dir.display())]
    MultiplePackages {
        dir: PathBuf,
        first: String,
        first_file: String,
        second: String,
        second_file: String,
    },
    #[error("{file}:{location}")]
    Parse {
        file: String,
        location: Location,
        source: ParseError,
    },
    #[error("{file}")]
    Constraint {
        file: String,
        source: ConstraintError,
    },
    #[error(transparent)]
    Bind(#[from] BindError),
    #[error("reading {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load, parse and bind the package in `dir`.
pub fn load_package(dir: &Path, ctx: &BuildContext) -> Result<SymbolTable, LoadError> {
    let _span = info_span!("load_package", dir = %dir.display()).entered();

    if !dir.is_dir() {
        return Err(LoadError::PackageNotFound(dir.to_path_buf()));
    }

    let mut files: Vec<SourceFile> = Vec::new();
    for path in candidate_files(dir, ctx)? {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source = std::fs::read_to_string(&path).map_err(io_error(&path))?;

        let constraint = file_constraint(&source).map_err(|source| LoadError::Constraint {
            file: file_name.clone(),
            source,
        })?;
        if let Some(constraint) = constraint
            && !ctx.matches(&constraint)
        {
            debug!(file = %file_name, "skipped by build constraint");
            continue;
        }

        let parsed = parse_source_file(&file_name, &source).map_err(|err| LoadError::Parse {
            location: LineMap::build(&source).location(err.pos(), &source),
            file: file_name.clone(),
            source: err,
        })?;

        if let Some(first) = files.first()
            && first.package.name != parsed.package.name
        {
            return Err(LoadError::MultiplePackages {
                dir: dir.to_path_buf(),
                first: first.package.name.clone(),
                first_file: first.file_name.clone(),
                second: parsed.package.name,
                second_file: file_name,
            });
        }
        debug!(file = %file_name, decls = parsed.decls.len(), "selected file");
        files.push(parsed);
    }

    let Some(first) = files.first() else {
        return Err(LoadError::NoGoFiles(dir.to_path_buf()));
    };
    let package_name = first.package.name.clone();
    let package_path = import_path(dir)?.unwrap_or_else(|| package_name.clone());
    debug!(package = %package_path, files = files.len(), "loaded package");

    Ok(BinderState::new(package_name, package_path).bind(&files)?)
}

/// `.go` files in `dir` that pass the file name rules, sorted by name.
fn candidate_files(dir: &Path, ctx: &BuildContext) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        let path = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !path.is_file() {
            continue;
        }
        if ctx.matches_file_name(name) {
            paths.push(path);
        } else if name.ends_with(".go") {
            debug!(file = %name, "skipped by file name");
        }
    }
    paths.sort();
    Ok(paths)
}

/// The import path of `dir`: the enclosing module's path plus the relative
/// directory. `None` outside a module.
pub fn import_path(dir: &Path) -> Result<Option<String>, LoadError> {
    let dir = dir.canonicalize().map_err(io_error(dir))?;
    for root in dir.ancestors() {
        let go_mod = root.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let contents = std::fs::read_to_string(&go_mod).map_err(io_error(&go_mod))?;
        let Some(module) = module_path(&contents) else {
            return Ok(None);
        };
        let relative = dir
            .strip_prefix(root)
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        return Ok(Some(if relative.is_empty() {
            module
        } else {
            format!("{module}/{relative}")
        }));
    }
    Ok(None)
}

/// The path named by a go.mod `module` directive.
pub fn module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with([' ', '\t', '"']) {
            return None;
        }
        let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
        (!path.is_empty()).then(|| path.to_string())
    })
}
