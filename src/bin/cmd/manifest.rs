use log::*;
use qiime_pack::qiime::config::Constants;
use qiime_pack::{Pipeline, PipelineConfig, Result};
use std::path::PathBuf;
use structopt::StructOpt;

/// Generate the QIIME2 manifests and the sample metadata from paired FASTQ files.
#[derive(StructOpt, PartialEq, Debug)]
#[structopt(setting=structopt::clap::AppSettings::ColoredHelp, name="QIIME-Pack - Manifest", author="Jingcheng Yang <yjcyxky@163.com>")]
pub struct Arguments {
    /// Project directory, FASTQ files are read from <root>/01_raw_data and the outputs are written to <root>/98_databasefiles. [default: /nvme/bio/data_fungi/valormicro_nc]
    #[structopt(name = "root", short = "r", long = "root", parse(from_os_str))]
    root: Option<PathBuf>,

    /// Directory of the paired FASTQ files, overrides the root.
    #[structopt(name = "input", short = "i", long = "input", parse(from_os_str))]
    input: Option<PathBuf>,

    /// Output directory, overrides the root.
    #[structopt(name = "output", short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,

    /// Config file (format: JSON) with `input_directory` and `output_directory`.
    #[structopt(name = "config", short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    /// Print the summary as JSON.
    #[structopt(name = "json", long = "json")]
    json: bool,
}

fn load_config(args: &Arguments) -> Result<PipelineConfig> {
    let mut config = match (&args.config, &args.root) {
        (Some(config_file), _) => PipelineConfig::from_json_file(config_file)?,
        (None, Some(root)) => PipelineConfig::from_root(root),
        (None, None) => PipelineConfig::from_root(Constants::ROOTDIR),
    };

    if let Some(input) = &args.input {
        config.input_directory = input.clone();
    }

    if let Some(output) = &args.output {
        config.output_directory = output.clone();
    }

    Ok(config)
}

pub fn run(args: &Arguments) -> Result<()> {
    let config = load_config(args)?;
    debug!("{:?}", config);

    let summary = Pipeline::new(config).run()?;
    if args.json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("{}", summary);
        println!("Generation completed successfully!");
    }

    Ok(())
}
