use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use enumgen::{FlagMode, RenderConfig};
use std::path::PathBuf;

const AFTER_HELP: &str = "\
Each <TYPE> names a type declared in the package. Methods are generated for
every constant declared with that type:

    func (v T) Name() string                 declared name, or \"\"
    func (v T) Lookup(name string) (T, bool) constant for a name
    func (v T) IsValid() bool                whether v is a declared constant
    var TValues = []T{...}                   all constants, in value order
    func (v T) String() string

With --marshal:
    func (v T) MarshalText() ([]byte, error)
    func (v *T) UnmarshalText(text []byte) error

With --flag=val or --flag=get (flag.Value):
    func (v *T) Set(s string) error

With --flag=get (flag.Getter):
    func (v T) Get() interface{}

With --strvalues, for string types:
    const TValuesString = \"a,b,...\"
    func (T) ValuesString() string";

/// CLI arguments for the enumgen binary.
#[derive(Parser, Debug)]
#[command(
    name = "enumgen",
    version,
    about = "Turn a set of Go constants into enum-like helper methods",
    after_long_help = AFTER_HELP
)]
pub struct CliArgs {
    /// Package directory to search for types.
    #[arg(long, default_value = ".")]
    pub pkg: PathBuf,

    /// Output file name.
    #[arg(long, default_value = "enum_gen.go")]
    pub out: PathBuf,

    /// Comma-separated list of build tags.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Run gofmt on the result.
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub format: bool,

    /// Generate Name().
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub name: bool,

    /// Generate Lookup().
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub lookup: bool,

    /// Generate IsValid().
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub isvalid: bool,

    /// Generate String().
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub string: bool,

    /// Generate the `<T>Values` slice.
    #[arg(
        long,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub values: bool,

    /// Generate encoding.TextMarshaler and TextUnmarshaler.
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub marshal: bool,

    /// Generate ValuesString() for string types.
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub strvalues: bool,

    /// Which flag interface to implement.
    #[arg(long, value_enum, ignore_case = true, default_value = "val")]
    pub flag: FlagArg,

    /// Print the resolved render configuration as JSON and exit.
    #[arg(long = "show-config", alias = "showConfig")]
    pub show_config: bool,

    /// Types to generate methods for.
    #[arg(value_name = "TYPE")]
    pub types: Vec<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FlagArg {
    /// No flag methods.
    None,
    /// flag.Value: Set.
    #[value(name = "val", alias = "value")]
    Val,
    /// flag.Getter: Set and Get.
    Get,
}

impl FlagArg {
    pub fn to_flag_mode(self) -> FlagMode {
        match self {
            FlagArg::None => FlagMode::None,
            FlagArg::Val => FlagMode::Value,
            FlagArg::Get => FlagMode::Get,
        }
    }
}

impl CliArgs {
    /// Full help, including the method catalogue, shown on usage errors.
    pub fn usage() -> String {
        Self::command().render_long_help().to_string()
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            enable_name: self.name,
            enable_lookup: self.lookup,
            enable_isvalid: self.isvalid,
            enable_string: self.string,
            enable_values: self.values,
            enable_marshal: self.marshal,
            enable_values_string: self.strvalues,
            flag_mode: self.flag.to_flag_mode(),
        }
    }
}
