use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use publabel_export_tsv::TsvLabelSink;
use publabel_ingest_tsv::TsvTitleSource;
use publabel_labeler::{GptClusterLabeler, OpenAiBackend, OpenAiConfig};
use publabel_models::GptModel;
use publabel_ports::{ClusterLabeler, LabelSink, TitleSource};
use publabel_schema::ClusterLabeling;
use publabel_storage_sqlite::{SqliteLabelSink, SqliteTitleSource};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "publabel")]
#[command(about = "Label clusters of scientific publications with a GPT model.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read titles from a TSV file and write labels to a TSV file.
    File {
        /// Titles input file: cluster number TAB concatenated titles, no header.
        #[arg(long)]
        titles: PathBuf,
        /// Labels output file (six tab-separated columns, no header).
        #[arg(long)]
        labels: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Read titles from and write labels to SQLite tables.
    Sqlite {
        /// SQLite database path.
        #[arg(long)]
        database: PathBuf,
        /// Titles input table with columns cluster_no and pub_titles.
        #[arg(long, default_value = "cluster_pub_titles")]
        titles_table: String,
        /// Labels output table (dropped and recreated).
        #[arg(long, default_value = "cluster_labels")]
        labels_table: String,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// OpenAI API key. If omitted, OPENAI_API_KEY is used.
    #[arg(long)]
    api_key: Option<String>,
    /// Chat completions endpoint.
    #[arg(long, default_value = "https://api.openai.com/v1/chat/completions")]
    api_base: String,
    /// GPT model identifier.
    #[arg(long, default_value = "gpt-3.5-turbo")]
    model: String,
    /// Don't print each generated labeling.
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::File {
            titles,
            labels,
            common,
        } => {
            let source = TsvTitleSource { path: titles };
            let sink = TsvLabelSink { path: labels };
            run(&source, &sink, common, "file")
        }

        Command::Sqlite {
            database,
            titles_table,
            labels_table,
            common,
        } => {
            let source = SqliteTitleSource {
                database: database.clone(),
                table: titles_table,
            };
            let sink = SqliteLabelSink {
                database,
                table: labels_table,
            };
            run(&source, &sink, common, "database")
        }
    }
}

fn run(
    source: &dyn TitleSource,
    sink: &dyn LabelSink,
    common: CommonArgs,
    medium: &str,
) -> Result<()> {
    let Some(model) = GptModel::from_identifier(&common.model) else {
        bail!(
            "unsupported GPT model {:?}; supported models: {}",
            common.model,
            supported_models()
        );
    };
    let api_key = common
        .api_key
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .context("no API key provided; pass --api-key or set OPENAI_API_KEY")?;

    println!("Reading publication titles from {medium}...");
    let started = Instant::now();
    let titles = source.read_titles()?;
    println!(
        "Reading publication titles took {}.",
        format_duration(started.elapsed())
    );
    println!();

    let backend = OpenAiBackend::new(OpenAiConfig {
        endpoint: common.api_base,
        api_key,
        ..OpenAiConfig::default()
    })?;
    let labeler = GptClusterLabeler::new(Box::new(backend), model);

    println!("Creating labeling for each cluster...");
    let started = Instant::now();
    let mut labelings: Vec<Option<ClusterLabeling>> = vec![None; titles.len()];
    for (cluster_no, pub_titles) in titles.iter().enumerate() {
        let Some(pub_titles) = pub_titles else { continue };
        if pub_titles.is_empty() {
            continue;
        }
        println!("Creating labeling for cluster {cluster_no}...");
        let labeling = labeler.label_cluster(pub_titles)?;
        if !common.quiet {
            print_labeling(&labeling);
        }
        labelings[cluster_no] = Some(labeling);
    }
    println!(
        "Creating labeling for each cluster took {}.",
        format_duration(started.elapsed())
    );
    println!();

    println!("Writing labeling to {medium}...");
    let started = Instant::now();
    sink.write_labels(&labelings)?;
    println!(
        "Writing labeling took {}.",
        format_duration(started.elapsed())
    );
    Ok(())
}

fn print_labeling(labeling: &ClusterLabeling) {
    println!("\tShort label: {}", labeling.short_label);
    println!("\tLong label:  {}", labeling.long_label);
    println!(
        "\tKeywords:    {}",
        labeling
            .rendered_keywords()
            .unwrap_or_else(|| "null".to_string())
    );
    println!("\tSummary:     {}", labeling.summary);
    println!("\tWikipedia:   {}", labeling.wikipedia_page);
    println!();
}

fn supported_models() -> String {
    GptModel::ALL
        .iter()
        .map(|model| model.identifier())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render an elapsed duration as hours, minutes, and seconds.
fn format_duration(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}
