use clap::Parser;

/// Creates the runner lookup file for SI-Droid from an Eventor registration export.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The Excel file exported from the entry overview of the event in Eventor
    /// (usually called "Entry overview nnnnn.xls").
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (file path, 'stdout' or empty) Where to write the lookup file. If not specified, the file is
    /// called runners_<event id>.csv and placed in the output directory.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (directory, optional) The directory of the lookup file when --out is not given. Defaults to
    /// the directory of the input file.
    #[clap(long, value_parser)]
    pub out_dir: Option<String>,

    /// (file path, optional) A JSON file with the worksheet, column and locale settings.
    /// Command line options take precedence over the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (default Anmälningar) The name of the worksheet containing the registrations.
    #[clap(long, value_parser)]
    pub worksheet: Option<String>,

    /// (default sv) The language tag whose conventions are used to sort courses and surnames.
    #[clap(long, value_parser)]
    pub locale: Option<String>,

    /// (number, Eventor URL or empty) The event id used in the name of the lookup file. If not
    /// provided, it is taken from the name of the input file, and otherwise replaced by the date.
    #[clap(long, value_parser)]
    pub event_id: Option<String>,

    /// If passed as an argument, prints the lookup table for review before writing it. The table
    /// goes to the standard error when the lookup file is written to 'stdout'.
    #[clap(long, takes_value = false)]
    pub preview: bool,

    /// (file path) A reference lookup file. If provided, the program checks that the generated
    /// content matches it.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn help(id: &str) -> String {
        Args::command()
            .get_arguments()
            .find(|a| a.get_id() == id)
            .and_then(|a| a.get_help())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn logging_goes_to_stderr() {
        let text = help("verbose");
        assert!(text.contains("standard error"));
        assert!(!text.contains("standard output"));
    }

    #[test]
    fn preview_mentions_stdout_output() {
        assert!(help("preview").contains("standard error"));
    }
}
