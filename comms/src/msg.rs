//! Encoding of the words exchanged through the mailbox.

use std::fmt;

const OPCODE_BITS: u32 = 8;
const OPCODE_MASK: u64 = (1 << OPCODE_BITS) - 1;

const IDLE_OP: u8 = 0;
const INFER_OP: u8 = 1;
const TRAIN_OP: u8 = 2;

/// A command sent from the coordinator to the worker.
///
/// On the wire it is a single word: the low 8 bits select the opcode and the
/// remaining high bits carry its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// No command pending.
    Idle,
    /// Infer the first item of the current batch.
    Infer,
    /// Train on the first `n_items` items of the current batch.
    Train { n_items: u64 },
    /// A word the worker does not understand.
    Unknown { opcode: u8, arg: u64 },
}

impl Command {
    /// Decodes a raw command word.
    ///
    /// # Arguments
    /// * `word` - The raw value read from the command word.
    ///
    /// # Returns
    /// The decoded command, `Unknown` for unrecognized opcodes.
    pub fn decode(word: u64) -> Self {
        let opcode = (word & OPCODE_MASK) as u8;
        let arg = word >> OPCODE_BITS;

        match opcode {
            IDLE_OP if arg == 0 => Self::Idle,
            INFER_OP => Self::Infer,
            TRAIN_OP => Self::Train { n_items: arg },
            opcode => Self::Unknown { opcode, arg },
        }
    }

    /// Encodes the command into its raw word.
    ///
    /// # Returns
    /// The value to publish on the command word.
    pub fn encode(self) -> u64 {
        match self {
            Self::Idle => IDLE_OP as u64,
            Self::Infer => INFER_OP as u64,
            Self::Train { n_items } => TRAIN_OP as u64 | (n_items << OPCODE_BITS),
            Self::Unknown { opcode, arg } => opcode as u64 | (arg << OPCODE_BITS),
        }
    }

    /// The opcode of this command.
    pub fn opcode(self) -> u8 {
        (self.encode() & OPCODE_MASK) as u8
    }

    /// The amount of batch items this command reads.
    pub fn n_items(self) -> u64 {
        match self {
            Self::Infer => 1,
            Self::Train { n_items } => n_items,
            Self::Idle | Self::Unknown { .. } => 0,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Infer => write!(f, "infer"),
            Self::Train { n_items } => write!(f, "train(n_items={n_items})"),
            Self::Unknown { opcode, arg } => write!(f, "unknown(opcode={opcode} arg={arg})"),
        }
    }
}

/// A request sent from the worker to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// No request pending.
    Idle,
    /// A report is waiting in the mailbox.
    Report,
    /// The worker finished its startup and the shared dataset is available.
    Ready,
    Unknown(u64),
}

impl Request {
    const IDLE: u64 = 0;
    const REPORT: u64 = 1;
    const READY: u64 = 123;

    /// Decodes a raw request word.
    pub fn decode(word: u64) -> Self {
        match word {
            Self::IDLE => Self::Idle,
            Self::REPORT => Self::Report,
            Self::READY => Self::Ready,
            other => Self::Unknown(other),
        }
    }

    /// Encodes the request into its raw word.
    pub fn encode(self) -> u64 {
        match self {
            Self::Idle => Self::IDLE,
            Self::Report => Self::REPORT,
            Self::Ready => Self::READY,
            Self::Unknown(word) => word,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_BATCH_ITEMS: u64 = 1024;

    #[test]
    fn train_round_trips_for_every_batch_size() {
        for k in 0..=MAX_BATCH_ITEMS {
            let word = Command::Train { n_items: k }.encode();
            let decoded = Command::decode(word);

            assert_eq!(decoded.opcode(), 2);
            assert_eq!(decoded, Command::Train { n_items: k });
            assert_eq!(decoded.n_items(), k);
        }
    }

    #[test]
    fn known_words() {
        assert_eq!(Command::decode(0), Command::Idle);
        assert_eq!(Command::decode(1), Command::Infer);
        assert_eq!(Command::decode(2 | (100 << 8)), Command::Train { n_items: 100 });
        assert_eq!(Command::Infer.n_items(), 1);
    }

    #[test]
    fn unknown_opcodes_keep_their_argument() {
        let cmd = Command::decode(7 | (3 << 8));
        assert_eq!(cmd, Command::Unknown { opcode: 7, arg: 3 });
        assert_eq!(cmd.encode(), 7 | (3 << 8));

        // An idle opcode carrying an argument is not a valid idle word.
        assert_eq!(Command::decode(5 << 8), Command::Unknown { opcode: 0, arg: 5 });
    }

    #[test]
    fn requests() {
        for req in [Request::Idle, Request::Report, Request::Ready] {
            assert_eq!(Request::decode(req.encode()), req);
        }
        assert_eq!(Request::decode(9), Request::Unknown(9));
    }
}
