use std::fmt;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use quill_cast::{
    apply_cast, decide_cast, promote_binary, promote_conditional, promote_unary, CastKind,
    ConstantCastError, Operation,
};
use quill_config::{init_tracing, QuillConfig};
use quill_types::{Constant, Sort, Type, TypeEnv, TypeStore};
use serde::Serialize;

mod literal;

use crate::literal::parse_literal;

/// Location token used in diagnostics; the CLI has no source positions.
const LOCATION: &str = "";

#[derive(Parser)]
#[command(name = "quill", version, about = "Quill cast and promotion checker")]
struct Cli {
    /// Path to a `quill.toml` config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether a cast is legal and optionally fold a constant through it
    Cast(CastArgs),
    /// Compute the common operand type of an operator
    Promote(PromoteArgs),
    /// List the types in the catalog
    Types(TypesArgs),
}

#[derive(Args)]
struct CastArgs {
    /// Source type name
    from: String,
    /// Target type name
    to: String,
    /// Treat the cast as written by the user
    #[arg(long)]
    explicit: bool,
    /// Allow compiler-only conversions (boxing and unboxing)
    #[arg(long)]
    internal: bool,
    /// Constant literal to fold through the cast
    #[arg(long, allow_hyphen_values = true)]
    constant: Option<String>,
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct PromoteArgs {
    /// Operator symbol; `?:` selects the conditional expression
    op: String,
    /// Left (or only) operand type
    left: String,
    /// Right operand type; omit for unary operators
    right: Option<String>,
    /// Constant value of the left branch of `?:`
    #[arg(long, allow_hyphen_values = true)]
    left_const: Option<String>,
    /// Constant value of the right branch of `?:`
    #[arg(long, allow_hyphen_values = true)]
    right_const: Option<String>,
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct TypesArgs {
    /// Emit JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => QuillConfig::load_from_path(path)?,
        None => QuillConfig::default(),
    };
    init_tracing(&config.logging);

    let mut store = TypeStore::default();
    config.catalog.install(&mut store)?;
    tracing::debug!(target: "quill.cli", types = store.types().count(), "catalog ready");

    match cli.command {
        Command::Cast(args) => {
            let report = cast(&store, &args)?;
            let exit = if report.error.is_some() { 1 } else { 0 };
            print_output(&report, args.json)?;
            Ok(exit)
        }
        Command::Promote(args) => {
            let report = promote(&store, &args)?;
            let exit = if report.error.is_some() { 1 } else { 0 };
            print_output(&report, args.json)?;
            Ok(exit)
        }
        Command::Types(args) => {
            let report = TypesReport {
                types: store
                    .types()
                    .map(|ty| TypeRow {
                        name: ty.name.clone(),
                        sort: ty.sort,
                    })
                    .collect(),
            };
            print_output(&report, args.json)?;
            Ok(0)
        }
    }
}

fn lookup<'env>(env: &'env TypeStore, name: &str) -> Result<&'env Type> {
    env.type_by_name(name)
        .with_context(|| format!("unknown type `{name}`"))
}

#[derive(Debug, Serialize)]
struct CastReport {
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<CastKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explicit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    via: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constant: Option<Constant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn cast(env: &TypeStore, args: &CastArgs) -> Result<CastReport> {
    let from = lookup(env, &args.from)?;
    let to = lookup(env, &args.to)?;

    let mut report = CastReport {
        from: from.name.clone(),
        to: to.name.clone(),
        kind: None,
        explicit: None,
        via: None,
        constant: None,
        error: None,
    };

    let cast = match decide_cast(env, LOCATION, from, to, args.explicit, args.internal) {
        Ok(cast) => cast,
        Err(err) => {
            report.error = Some(err.to_string());
            return Ok(report);
        }
    };
    report.kind = Some(cast.kind());
    report.explicit = Some(cast.explicit());
    report.via = cast.conversion().via().map(|ty| ty.name.clone());

    if let Some(text) = &args.constant {
        let value = constant_of_type(env, text, from)?;
        match apply_cast(LOCATION, value, &cast) {
            Ok(folded) => report.constant = Some(folded),
            Err(ConstantCastError::Internal(err)) => {
                return Err(err).context("constant cannot be folded through this cast");
            }
            Err(err) => report.error = Some(err.to_string()),
        }
    }

    Ok(report)
}

/// Parse `text` and implicitly convert it to `ty`, the way an assignment of the literal would.
fn constant_of_type(env: &TypeStore, text: &str, ty: &Type) -> Result<Constant> {
    let literal = parse_literal(text)?;
    if literal.sort() == ty.sort {
        return Ok(literal);
    }

    let literal_ty = env
        .canonical(literal.sort())
        .with_context(|| format!("no type for literal `{text}`"))?;
    let cast = decide_cast(env, LOCATION, literal_ty, ty, false, false)
        .with_context(|| format!("literal `{text}` is not a {}", ty.name))?;
    apply_cast(LOCATION, literal, &cast)
        .with_context(|| format!("literal `{text}` is not a {}", ty.name))
}

#[derive(Debug, Serialize)]
struct PromoteReport {
    op: String,
    left: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn promote(env: &TypeStore, args: &PromoteArgs) -> Result<PromoteReport> {
    let left = lookup(env, &args.left)?;
    let right = args
        .right
        .as_deref()
        .map(|name| lookup(env, name))
        .transpose()?;

    let conditional = args.op == "?:";
    if !conditional && (args.left_const.is_some() || args.right_const.is_some()) {
        bail!("--left-const and --right-const only apply to `?:`");
    }

    let mut report = PromoteReport {
        op: args.op.clone(),
        left: left.name.clone(),
        right: right.map(|ty| ty.name.clone()),
        result: None,
        error: None,
    };

    let promoted = match right {
        Some(right) if conditional => {
            let const0 = args.left_const.as_deref().map(parse_literal).transpose()?;
            let const1 = args.right_const.as_deref().map(parse_literal).transpose()?;
            promote_conditional(env, left, right, const0.as_ref(), const1.as_ref())
                .with_context(|| format!("no conditional type for {left} and {right}"))
                .map_err(|err| err.to_string())
        }
        None if conditional => bail!("`?:` needs two operand types"),
        Some(right) => {
            let op = Operation::from_symbol(&args.op, false)
                .with_context(|| format!("unknown binary operator `{}`", args.op))?;
            promote_binary(env, LOCATION, op, left, right).map_err(|err| err.to_string())
        }
        None => {
            let op = Operation::from_symbol(&args.op, true)
                .with_context(|| format!("unknown unary operator `{}`", args.op))?;
            promote_unary(env, LOCATION, op, left).map_err(|err| err.to_string())
        }
    };

    match promoted {
        Ok(ty) => report.result = Some(ty.name.clone()),
        Err(err) => report.error = Some(err),
    }
    Ok(report)
}

#[derive(Debug, Serialize)]
struct TypesReport {
    types: Vec<TypeRow>,
}

#[derive(Debug, Serialize)]
struct TypeRow {
    name: String,
    sort: Sort,
}

impl fmt::Display for CastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = self.kind {
            write!(f, "{} -> {}: {kind}", self.from, self.to)?;
            if let Some(via) = &self.via {
                write!(f, " via {via}")?;
            }
            if self.explicit == Some(true) {
                f.write_str(" (explicit)")?;
            }
            if let Some(constant) = &self.constant {
                write!(f, "\n  constant: {constant}")?;
            }
        }
        if let Some(error) = &self.error {
            if self.kind.is_some() {
                f.write_str("\n")?;
            }
            f.write_str(error)?;
        }
        Ok(())
    }
}

impl fmt::Display for PromoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.result, &self.error) {
            (Some(result), _) => f.write_str(result),
            (None, Some(error)) => f.write_str(error),
            (None, None) => Ok(()),
        }
    }
}

impl fmt::Display for TypesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.types.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{:<14} {:?}", row.name, row.sort)?;
        }
        Ok(())
    }
}

fn print_output<T: Serialize + fmt::Display>(value: &T, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value)?;
        println!("{out}");
    } else {
        println!("{value}");
    }
    Ok(())
}
