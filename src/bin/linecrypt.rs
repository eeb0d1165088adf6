use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use linecrypt::file_ops;
use linecrypt::passphrase;

/// Encrypt or decrypt line-oriented text using AES-256-CTR and a
/// passphrase-derived key.
#[derive(Parser, Debug)]
#[command(name = "linecrypt", version, about)]
struct Cli {
    /// Encrypt the plaintext file into the container file
    #[arg(short = 'e', long = "encrypt", action = ArgAction::SetTrue)]
    encrypt: bool,

    /// Decrypt the container file and print the plaintext
    #[arg(short = 'd', long = "decrypt", action = ArgAction::SetTrue)]
    decrypt: bool,

    /// Erase the plaintext file after a successful encryption
    #[arg(long = "erase", action = ArgAction::SetTrue)]
    erase: bool,

    /// Read passphrase from stdin instead of from terminal
    #[arg(long = "passphrase-stdin", action = ArgAction::SetTrue)]
    passphrase_stdin: bool,

    /// Path to the plaintext file
    #[arg(long = "plain", default_value = "plaintext.txt")]
    plain: PathBuf,

    /// Path to the encrypted container file
    #[arg(long = "crypt", default_value = "encrypted.txt")]
    crypt: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let get_reader = || -> Box<dyn passphrase::PassphraseReader> {
        if cli.passphrase_stdin {
            Box::new(passphrase::ReaderPassphraseReader::new(Box::new(
                std::io::stdin(),
            )))
        } else {
            Box::new(passphrase::TerminalPassphraseReader::new())
        }
    };

    if !cli.encrypt && !cli.decrypt {
        eprintln!("nothing to do; pass --encrypt and/or --decrypt (see --help)");
        return ExitCode::SUCCESS;
    }

    if cli.encrypt {
        if let Err(err) = file_ops::encrypt_file(&cli.plain, &cli.crypt, &mut *get_reader(), cli.erase)
        {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
        eprintln!("Encryption complete.");
    }

    if cli.decrypt {
        match file_ops::decrypt_file(&cli.crypt, &mut *get_reader()) {
            Ok(plaintext) => {
                print!("{}", plaintext);
            }
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
