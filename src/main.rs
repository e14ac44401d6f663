// Command-line front end for the ledger. It stands in for the UI: it collects
// fields, calls into the ledger and prints back plain data.
use clap::Parser;
use log::{error, LevelFilter};
use rsa_ledger::{
    Block, Command, DemoKeyTable, KeyPairGenerator, Ledger, Opt, Transaction, GLOBAL_CONFIG,
};
use std::fs;
use std::process;

fn main() {
    // I log at info by default so every submission and sealed block shows up
    env_logger::builder().filter_level(LevelFilter::Info).init();

    // I let --data-dir override whatever LEDGER_DATA_DIR set up
    let opt = Opt::parse();
    if let Some(dir) = opt.data_dir {
        GLOBAL_CONFIG.set_data_dir(dir);
    }

    // If a command fails I log the error and exit with code 1
    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// This is where I handle each CLI command. Every command except keygen opens
// the ledger on disk, does one thing and prints the result.
fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    let settings = GLOBAL_CONFIG.get_keygen_settings();
    match command {
        // When I just want to see a keypair without touching the ledger
        Command::Keygen => {
            let pair = KeyPairGenerator::new(settings)?.generate()?;
            let (public, private) = (pair.public_key(), pair.private_key());
            println!("Public key:  n = {}, e = {}", public.n, public.e);
            println!("Private key: n = {}, d = {}", private.n, private.d);
        }
        Command::Submit {
            sender,
            receiver,
            amount,
            message,
            mine,
        } => {
            // The ledger mints fresh keys for both parties on every submission
            let ledger = open_ledger()?;
            let tx = ledger.submit_transaction(&sender, &receiver, &amount, &message)?;
            print_transaction(&tx);
            // With --mine I seal the pool right away
            if mine {
                let block = ledger.mine()?;
                print_block(&block);
            }
            println!("Success!");
        }
        // I list what is waiting to be sealed, decrypted with the stored keys
        Command::Pending => {
            let ledger = open_ledger()?;
            let pending = ledger.list_pending()?;
            if pending.is_empty() {
                println!("No pending transactions");
            }
            for tx in &pending {
                print_transaction(tx);
            }
        }
        // Mining an empty pool still seals an empty block
        Command::Mine => {
            let block = open_ledger()?.mine()?;
            print_block(&block);
        }
        Command::Printchain => {
            for block in open_ledger()?.get_chain()? {
                print_block(&block);
            }
        }
        // Opening already checks every link, so this mostly reports the result
        Command::Verifychain => {
            let ledger = open_ledger()?;
            ledger.verify_chain()?;
            println!("Chain is valid ({} blocks)", ledger.get_chain()?.len());
        }
        // I write the chain as JSON to a file, or to stdout without --output
        Command::Export { output } => {
            let json = open_ledger()?.export_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("Exported chain to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        // The demo table mints a fresh keypair per party of each pending transaction
        Command::Demokeys => {
            let pending = open_ledger()?.list_pending()?;
            let mut generator = KeyPairGenerator::new(settings)?;
            print!("{}", DemoKeyTable::materialize(&pending, &mut generator)?);
        }
    }
    Ok(())
}

// I open the ledger at the configured data dir with a generator built from the
// current key settings
fn open_ledger() -> rsa_ledger::Result<Ledger> {
    let generator = KeyPairGenerator::new(GLOBAL_CONFIG.get_keygen_settings())?;
    Ledger::open(&GLOBAL_CONFIG.get_data_dir(), generator)
}

fn print_transaction(tx: &Transaction) {
    let message = match tx.decrypted_message() {
        Ok(message) if message.is_empty() => "No message".to_string(),
        Ok(message) => message,
        Err(e) => format!("<{e}>"),
    };
    println!(
        "{} -> {}: {} ({message})",
        tx.get_sender(),
        tx.get_receiver(),
        tx.get_amount()
    );
    println!("  Encrypted message: {:?}", tx.get_ciphertext());
    println!("  Signature:         {:?}", tx.get_signature());
}

fn print_block(block: &Block) {
    println!("Block #{} at {}", block.get_index(), block.get_timestamp());
    println!("  Previous hash: {}", block.get_previous_hash());
    println!("  Hash:          {}", block.get_hash());
    for tx in block.get_transactions() {
        println!(
            "  - {} (n = {}) -> {} (n = {}): {}",
            tx.get_sender(),
            tx.get_sender_key_pair().modulus(),
            tx.get_receiver(),
            tx.get_receiver_key_pair().modulus(),
            tx.get_amount()
        );
    }
    println!();
}
