//! Seedlock CLI - passphrase-based recovery-phrase encryption
//!
//! Command-line interface for sealing and unsealing recovery phrases
//! using AES-256-GCM with PBKDF2-HMAC-SHA256 key derivation, plus
//! SHA-256 fingerprinting of file contents.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use seedlock::passphrase::{PassphraseReader, ReaderPassphraseReader, TerminalPassphraseReader};
use seedlock::vault;

#[derive(Parser)]
#[command(name = "seedlock")]
#[command(version)]
#[command(about = "Passphrase-based recovery-phrase encryption.", long_about = None)]
struct Cli {
    /// Read passphrase from stdin instead of from terminal
    #[arg(long, global = true)]
    passphrase_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file into a sealed envelope
    #[command(alias = "s")]
    Seal {
        /// Path to the file whose contents is to be sealed
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the envelope to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Decrypt a sealed envelope back into plaintext
    #[command(alias = "u")]
    Unseal {
        /// Path to the sealed envelope file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the plaintext to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the SHA-256 hex fingerprint of a file's contents
    Hash {
        /// Path to the file to fingerprint
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Seal { input, output } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            vault::seal_file(&input, &output, &mut *reader)
        }
        Commands::Unseal { input, output } => {
            let mut reader = get_passphrase_reader(cli.passphrase_stdin);
            vault::unseal_file(&input, &output, &mut *reader)
        }
        Commands::Hash { input } => vault::digest_file(&input).map(|digest| println!("{}", digest)),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn get_passphrase_reader(use_stdin: bool) -> Box<dyn PassphraseReader> {
    if use_stdin {
        Box::new(ReaderPassphraseReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPassphraseReader)
    }
}
