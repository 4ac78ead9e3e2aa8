use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use newsforge_core::article::{ArticleLength, Tone, WritingStyle};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "newsforge")]
#[command(about = "NEWSFORGE - multi-source article synthesis and breaking news scoring", long_about = None)]
struct Cli {
    /// JSON file replacing the built-in fallback content templates
    #[arg(long, global = true, env = "NEWSFORGE_TEMPLATES")]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize one article from a JSON array of source articles
    Synthesize {
        /// JSON file containing the source articles
        #[arg(long)]
        sources: PathBuf,
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value_t = WritingStyle::Journalistic)]
        style: WritingStyle,
        #[arg(long, default_value_t = Tone::Professional)]
        tone: Tone,
        #[arg(long, default_value_t = ArticleLength::Medium)]
        length: ArticleLength,
        /// Write the article here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Apply free-text editing instructions to a synthesized article
    Edit {
        #[arg(long)]
        article: PathBuf,
        #[arg(long, short)]
        instructions: String,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Suggest alternative headlines
    Titles {
        #[arg(long)]
        article: PathBuf,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Editorial quality review
    Quality {
        #[arg(long)]
        article: PathBuf,
    },
    /// Social-media copy for an article
    Viral {
        #[arg(long)]
        article: PathBuf,
    },
    /// Log the article as published and print the receipt
    Publish {
        #[arg(long)]
        article: PathBuf,
    },
    /// Score articles for breaking-news status
    Classify {
        /// JSON file containing an array of articles
        #[arg(long)]
        articles: PathBuf,
        /// Seed for the engagement simulation
        #[arg(long)]
        seed: Option<u64>,
        /// Print only the badge for each article
        #[arg(long)]
        badges: bool,
    },
    /// Search news articles
    Search {
        query: String,
    },
    /// Most viewed articles
    MostViewed {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Record a view of an article
    View {
        article_id: String,
    },
    /// Partner links and their counters
    Affiliate {
        #[command(subcommand)]
        action: AffiliateAction,
    },
    /// Subscribe an email address to the newsletter
    Subscribe {
        email: String,
    },
    /// End the backend session
    Logout,
    /// Read and write persisted preferences
    Preference {
        #[command(subcommand)]
        action: PreferenceAction,
    },
    /// Cached user location
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },
    /// Explain a geolocation failure code
    LocationError {
        code: u16,
    },
}

#[derive(Subcommand)]
enum LocationAction {
    /// Print the cached location, if it has not expired
    Show,
    /// Cache a location for local news
    Set {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
}

#[derive(Subcommand)]
enum AffiliateAction {
    /// Partner link for a topic
    Link { topic: String },
    /// Click, conversion and revenue totals
    Stats,
}

#[derive(Subcommand)]
enum PreferenceAction {
    /// Print one preference value as JSON
    Get { key: String },
    /// Store a preference (the value is parsed as JSON, else kept as a string)
    Set { key: String, value: String },
    /// Delete a preference
    Remove { key: String },
    /// Choose the AI service used for synthesis
    Service { preference: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::LocationError { code } = cli.command {
        println!("{}", newsforge_core::geolocation::geolocation_error_message(code));
        return Ok(());
    }

    let ctx = AppContext::open_default(cli.templates.as_deref())?;
    ctx.show_onboarding_once();

    match cli.command {
        Commands::Synthesize {
            sources,
            topic,
            style,
            tone,
            length,
            out,
        } => commands::article::synthesize(&ctx, &sources, topic, style, tone, length, out).await?,
        Commands::Edit {
            article,
            instructions,
            out,
        } => commands::article::edit(&ctx, &article, &instructions, out).await?,
        Commands::Titles { article, count } => commands::article::titles(&ctx, &article, count).await?,
        Commands::Quality { article } => commands::article::quality(&ctx, &article).await?,
        Commands::Viral { article } => commands::article::viral(&ctx, &article).await?,
        Commands::Publish { article } => commands::article::publish(&ctx, &article)?,
        Commands::Classify {
            articles,
            seed,
            badges,
        } => commands::breaking::classify(&articles, seed, badges)?,
        Commands::Search { query } => commands::news::search(&ctx, &query).await?,
        Commands::MostViewed { limit } => commands::news::most_viewed(&ctx, limit).await?,
        Commands::View { article_id } => commands::news::view(&ctx, &article_id).await?,
        Commands::Affiliate { action } => match action {
            AffiliateAction::Link { topic } => commands::news::affiliate_link(&ctx, &topic).await?,
            AffiliateAction::Stats => commands::news::affiliate_stats(&ctx).await?,
        },
        Commands::Subscribe { email } => commands::news::subscribe(&ctx, &email).await?,
        Commands::Logout => commands::news::logout(&ctx).await?,
        Commands::Preference { action } => match action {
            PreferenceAction::Get { key } => commands::preference::get(&ctx, &key)?,
            PreferenceAction::Set { key, value } => commands::preference::set(&ctx, &key, &value)?,
            PreferenceAction::Remove { key } => commands::preference::remove(&ctx, &key)?,
            PreferenceAction::Service { preference } => {
                commands::preference::service(&ctx, &preference).await?
            }
        },
        Commands::Location { action } => match action {
            LocationAction::Show => commands::preference::show_location(&ctx)?,
            LocationAction::Set {
                latitude,
                longitude,
                city,
                country,
            } => commands::preference::set_location(&ctx, latitude, longitude, city, country)?,
        },
        Commands::LocationError { .. } => {}
    }

    Ok(())
}
