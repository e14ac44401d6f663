use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rsa-ledger")]
pub struct Opt {
    #[arg(
        long = "data-dir",
        global = true,
        help = "Ledger database directory (defaults to LEDGER_DATA_DIR or ./data)"
    )]
    pub data_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "keygen", about = "Generate and print a fresh keypair")]
    Keygen,
    #[command(name = "submit", about = "Encrypt, sign and queue a transaction")]
    Submit {
        #[arg(help = "Sender name")]
        sender: String,
        #[arg(help = "Receiver name")]
        receiver: String,
        #[arg(help = "Amount to transfer")]
        amount: String,
        #[arg(default_value = "", help = "Optional message")]
        message: String,
        #[arg(long = "mine", help = "Seal a block right after submitting")]
        mine: bool,
    },
    #[command(name = "pending", about = "List pending transactions")]
    Pending,
    #[command(name = "mine", about = "Seal pending transactions into a block")]
    Mine,
    #[command(name = "printchain", about = "Print all blocks in the chain")]
    Printchain,
    #[command(name = "verifychain", about = "Re-check hashes and links of the chain")]
    Verifychain,
    #[command(name = "export", about = "Export the chain as JSON")]
    Export {
        #[arg(long = "output", short = 'o', help = "Write to a file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(
        name = "demokeys",
        about = "Show freshly minted demo keys for every pending party"
    )]
    Demokeys,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit_with_mine() {
        let args = ["rsa-ledger", "submit", "alice", "bob", "10", "hi", "--mine"];
        let opt = Opt::try_parse_from(args).unwrap();
        match opt.command {
            Command::Submit {
                sender,
                receiver,
                amount,
                message,
                mine,
            } => {
                assert_eq!(sender, "alice");
                assert_eq!(receiver, "bob");
                assert_eq!(amount, "10");
                assert_eq!(message, "hi");
                assert!(mine);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_message_is_optional() {
        let opt = Opt::try_parse_from(["rsa-ledger", "submit", "alice", "bob", "10"]).unwrap();
        assert!(matches!(
            opt.command,
            Command::Submit { message, mine: false, .. } if message.is_empty()
        ));
    }

    #[test]
    fn test_global_data_dir() {
        let opt =
            Opt::try_parse_from(["rsa-ledger", "mine", "--data-dir", "/tmp/ledger"]).unwrap();
        assert_eq!(opt.data_dir, Some(PathBuf::from("/tmp/ledger")));
    }
}
