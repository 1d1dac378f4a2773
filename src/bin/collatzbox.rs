use clap::{Args, Parser, Subcommand};

use collatzbox::keygen::DEFAULT_TRANS_KEY_LENGTH;
use collatzbox::{KeyGenerator, KeySet, pipeline};

#[derive(Parser, Debug)]
#[command(
    name = "collatzbox",
    version,
    about = "educational reversible text obfuscation (not secure encryption)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct KeyOptions {
    /// Exported key string (SEED:A:B:TRANSKEY); overrides the individual options
    #[arg(long = "key")]
    key: Option<String>,

    /// Collatz seed value
    #[arg(long = "seed", default_value_t = 27)]
    seed: u64,

    /// Affine multiplier (must be coprime with 256)
    #[arg(long = "affine-a", default_value_t = 5)]
    affine_a: i64,

    /// Affine offset
    #[arg(long = "affine-b", default_value_t = 8)]
    affine_b: i64,

    /// Transposition key (digit permutation of 1..=n)
    #[arg(long = "trans-key", default_value = "3142")]
    trans_key: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt a text argument, printing hex ciphertext and metadata
    Encrypt {
        /// Text to encrypt
        text: String,
        #[command(flatten)]
        key_options: KeyOptions,
    },
    /// Decrypt a hex ciphertext
    Decrypt {
        /// Hex ciphertext to decrypt
        ciphertext: String,
        #[command(flatten)]
        key_options: KeyOptions,
        /// Original plaintext length in bytes, used to strip block padding
        #[arg(long = "original-length")]
        original_length: Option<usize>,
    },
    /// Generate a fresh random key set
    Keygen {
        /// Length of the transposition key (1-9)
        #[arg(long = "trans-key-length", default_value_t = DEFAULT_TRANS_KEY_LENGTH)]
        trans_key_length: usize,
    },
    /// Show all parameters derived from an exported key string
    KeyInfo {
        /// Exported key string (SEED:A:B:TRANSKEY)
        key: String,
    },
}

fn keyset_from(options: &KeyOptions) -> collatzbox::Result<KeySet> {
    match &options.key {
        Some(exported) => KeySet::import(exported),
        None => KeySet::new(
            options.seed,
            options.affine_a,
            options.affine_b,
            options.trans_key.clone(),
            collatzbox::keyset::DEFAULT_MODULUS,
        ),
    }
}

fn print_key_info(keyset: &KeySet) {
    let info = keyset.info();
    println!("seed: {}", info.seed);
    println!("affine_a: {}", info.affine_a);
    println!("affine_b: {}", info.affine_b);
    println!("affine_a_inverse: {}", info.affine_a_inverse);
    println!("modulus: {}", info.modulus);
    println!("trans_key: {}", info.trans_key);
}

fn run(command: Commands) -> collatzbox::Result<()> {
    match command {
        Commands::Encrypt { text, key_options } => {
            let keyset = keyset_from(&key_options)?;
            let (ciphertext, metadata) = pipeline::encrypt(&text, &keyset);
            println!("ciphertext: {}", ciphertext);
            println!("original_length: {}", metadata.original_length);
            println!("encrypted_length: {}", metadata.encrypted_length);
            println!("zeros: {}", metadata.zeros);
            println!("ones: {}", metadata.ones);
            println!("balance_ratio: {}", metadata.balance_ratio);
        }
        Commands::Decrypt {
            ciphertext,
            key_options,
            original_length,
        } => {
            let keyset = keyset_from(&key_options)?;
            let plaintext = pipeline::decrypt(&ciphertext, &keyset, original_length)?;
            println!("plaintext: {}", plaintext);
        }
        Commands::Keygen { trans_key_length } => {
            let generator = KeyGenerator::with_default_modulus();
            let keyset = generator.generate_full_keyset(trans_key_length)?;
            print_key_info(&keyset);
            println!("exported: {}", keyset.export());

            let analysis = generator.analyze_seed(keyset.seed(), 256);
            println!("seed_zeros: {}", analysis.zeros);
            println!("seed_ones: {}", analysis.ones);
            println!("seed_balance_ratio: {}", analysis.balance_ratio);
        }
        Commands::KeyInfo { key } => {
            let keyset = KeySet::import(&key)?;
            print_key_info(&keyset);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
