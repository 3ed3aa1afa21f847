use anyhow::Result;
use clap::Args;
use readiness_spec::SurveySchema;

use crate::config::Settings;

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Print the JSON Schema of the schema file format instead
    #[arg(long = "json-schema", default_value_t = false)]
    pub json_schema: bool,
}

pub fn run(args: &SchemaArgs, settings: &Settings) -> Result<()> {
    let rendered = if args.json_schema {
        serde_json::to_string_pretty(&schemars::schema_for!(SurveySchema))?
    } else {
        serde_json::to_string_pretty(&settings.schema)?
    };
    println!("{rendered}");
    Ok(())
}
