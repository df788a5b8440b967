use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_markov_core::io::write_file;
use rs_markov_core::model::markov_model::render_lines;
use rs_markov_core::model::{GenerationConfig, MarkovModel};

/// Generates text with an order-N word Markov chain trained on a text file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Training text file
    input: PathBuf,

    /// File receiving the generated text (replaced if it exists)
    output: PathBuf,

    /// Chain order N: number of words in a prefix, 1 <= N < 20
    order: usize,

    /// Target number of tokens L (words and punctuation marks), L >= N
    length: usize,

    /// Seed of the random source, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Number of texts to generate, one per line
    #[arg(long, default_value_t = 1)]
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    run(Cli::parse())
}

/// Trains on `cli.input` and writes the generated text to `cli.output`.
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Validated before touching any file
    let config = GenerationConfig::new(cli.order, cli.length)?;
    if cli.count == 0 {
        return Err("count must be >= 1".into());
    }

    let model = MarkovModel::from_file(&cli.input, config.order())?;

    let text = if cli.count == 1 {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        model.generate_text(&config, &mut rng)?
    } else {
        let seed = cli.seed.unwrap_or_else(rand::random);
        render_lines(&model.generate_batch(&config, cli.count, seed)?)
    };
    debug!("Result: {text}");

    write_file(&cli.output, &text)?;
    info!("Text written successfully to {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rs_markov_core::MarkovError;

    #[test]
    fn four_positional_arguments() {
        let cli = Cli::try_parse_from(["markov", "in.txt", "out.txt", "2", "50"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.txt"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(cli.order, 2);
        assert_eq!(cli.length, 50);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.count, 1);
    }

    #[test]
    fn optional_seed_and_count() {
        let cli = Cli::try_parse_from(["markov", "a", "b", "1", "5", "--seed", "7", "--count", "3"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.count, 3);
    }

    #[test]
    fn missing_or_negative_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["markov", "in.txt", "out.txt", "2"]).is_err());
        assert!(Cli::try_parse_from(["markov", "in.txt", "out.txt", "-1", "5"]).is_err());
    }

    fn assert_rejected_before_io(order: &str, length: &str) {
        let output = std::env::temp_dir().join(format!("rs-markov-cli-{order}-{length}-{}.txt", std::process::id()));
        let _ = std::fs::remove_file(&output);
        let cli = Cli::try_parse_from([
            "markov",
            "/no/such/file",
            output.to_str().unwrap(),
            order,
            length,
        ])
        .unwrap();

        let err = run(cli).unwrap_err();
        let err = err.downcast_ref::<MarkovError>().expect("a MarkovError");
        assert!(matches!(err, MarkovError::InvalidConfiguration(_)), "{err}");
        assert!(!output.exists());
    }

    #[test]
    fn order_out_of_range_fails_before_reading_input() {
        assert_rejected_before_io("20", "5");
    }

    #[test]
    fn length_below_order_fails_before_reading_input() {
        assert_rejected_before_io("3", "2");
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let output = std::env::temp_dir().join(format!("rs-markov-cli-missing-{}.txt", std::process::id()));
        let cli = Cli::try_parse_from(["markov", "/no/such/file", output.to_str().unwrap(), "2", "5"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(matches!(err.downcast_ref::<MarkovError>(), Some(MarkovError::Io { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
