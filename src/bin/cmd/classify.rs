use qiime_pack::qiime::classifier;
use qiime_pack::Result;
use std::path::Path;
use structopt::StructOpt;

/// Show the sample id, sequencer and sample type guessed from FASTQ filenames.
#[derive(StructOpt, PartialEq, Debug)]
#[structopt(setting=structopt::clap::AppSettings::ColoredHelp, name="QIIME-Pack - Classify", author="Jingcheng Yang <yjcyxky@163.com>")]
pub struct Arguments {
    /// Forward read files (only the file names are used)
    #[structopt(name = "FILE", required = true)]
    inputs: Vec<String>,
}

/// One JSON document per input, directories stripped.
fn classify_inputs(inputs: &[String]) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(inputs.len());
    for input in inputs {
        let filename = Path::new(input)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(input);
        lines.push(serde_json::to_string(&classifier::classify(filename))?);
    }

    Ok(lines)
}

pub fn run(args: &Arguments) -> Result<()> {
    for line in classify_inputs(&args.inputs)? {
        println!("{}", line);
    }

    Ok(())
}
