extern crate log;
extern crate stderrlog;
extern crate structopt;

mod cmd;

use cmd::classify;
use cmd::manifest;
use log::*;
use structopt::StructOpt;

/// A suite of programs for preparing QIIME2 imports from paired fastq files
#[derive(StructOpt, Debug)]
#[structopt(setting=structopt::clap::AppSettings::ColoredHelp, name = "QIIME Tool Suite (qiime-pack)", author="Jingcheng Yang <yjcyxky@163.com>")]
struct Opt {
  /// A flag which control whether show more messages, true if used in the command line
  #[structopt(short="q", long="quiet")]
  quiet: bool,

  /// The number of occurrences of the `v/verbose` flag
  /// Verbose mode (-v, -vv), progress messages are shown by default
  #[structopt(short="v", long="verbose", parse(from_occurrences))]
  verbose: usize,

  #[structopt(subcommand)]
  cmd: SubCommands
}

#[derive(Debug, PartialEq, StructOpt)]
enum SubCommands {
  #[structopt(name="manifest")]
  Manifest(manifest::Arguments),
  #[structopt(name="classify")]
  Classify(classify::Arguments)
}

fn main() {
  let opt = Opt::from_args();

  // 0: error, 1: warn, 2: info
  if let Err(err) = stderrlog::new()
    .module(module_path!())
    .modules(vec!["qiime_pack"])
    .quiet(opt.quiet)
    .verbosity(opt.verbose + 2)
    .init()
  {
    eprintln!("Cannot initialize the logger: {}", err);
  }

  let result = match opt.cmd {
    SubCommands::Manifest(arguments) => manifest::run(&arguments),
    SubCommands::Classify(arguments) => classify::run(&arguments),
  };

  if let Err(err) = result {
    error!("{}", err);
    std::process::exit(err.exit_code());
  }
}
