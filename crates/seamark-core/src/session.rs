//! Transmission session state machine.
//!
//! One [`ProtocolSession`] drives one complete transmission: the carrier
//! loop, key disclosure, tag computation, payload assembly, and the final
//! sender-side chain verification. The session owns its key chain and
//! Bloom accumulator exclusively; nothing is shared across sessions.

use rand::Rng;
use seamark_crypto::{ChainKey, KeyChain, SeedProvider, authentication_tag};
use seamark_proto::{BinaryBroadcast, PositionReport, SecurityLevel, encode_auth_payloads};

use crate::{
    bloom::BloomAccumulator,
    error::SessionError,
    transport::{RenderedFrame, Transport},
};

/// Smallest session chain length.
pub const CHAIN_LENGTH_MIN: u32 = 10;

/// Exclusive upper bound on the session chain length.
pub const CHAIN_LENGTH_MAX: u32 = 4510;

/// Configuration for one transmission session.
///
/// The security level arrives here already parsed into the closed
/// [`SecurityLevel`] enum; an unsupported raw level fails at
/// `SecurityLevel::try_from`, before any session state (or transport
/// traffic) exists.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Security level driving digest sizes, carrier count, and framing
    pub level: SecurityLevel,
    /// Source of the chain's master seed
    pub seed_provider: SeedProvider,
    /// Carrier position report template
    pub carrier: PositionReport,
    /// Authenticated frame header template
    pub broadcast: BinaryBroadcast,
}

impl SessionConfig {
    /// Configuration with the default sender-role frame templates.
    #[must_use]
    pub fn new(level: SecurityLevel, seed_provider: SeedProvider) -> Self {
        Self {
            level,
            seed_provider,
            carrier: PositionReport::default(),
            broadcast: BinaryBroadcast::default(),
        }
    }
}

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Constructed, nothing transmitted
    Init,
    /// Sending carrier position reports
    SendCarrier,
    /// Deriving the disclosable chain key
    DeriveKey,
    /// Computing the authentication tag
    ComputeTag,
    /// Assembling the authenticated payload(s)
    EncodePayload,
    /// Handing frames to the transport
    Transmit,
    /// Re-checking the chain against its commitment
    SelfVerify,
    /// Session completed successfully
    Done,
    /// Session aborted
    Failed,
}

/// Commitment material verifiers need before the first disclosure.
///
/// Distribution is an explicit out-of-band handshake owned by the caller:
/// obtain this before [`ProtocolSession::run`] and deliver it to every
/// verifier. No AIS frame carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitmentAnnouncement {
    /// Terminal value of the one-way chain
    pub commitment: ChainKey,
    /// Session chain length `n`
    pub chain_length: u32,
    /// Security level of the session
    pub level: SecurityLevel,
}

/// Outcome of a completed session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Security level the session ran at
    pub level: SecurityLevel,
    /// Total frames handed to the transport (carriers + authenticated)
    pub frames_sent: usize,
    /// Chain key disclosed in the authenticated frame
    pub disclosed_key: ChainKey,
    /// Truncated authentication tag
    pub tag: Vec<u8>,
    /// Timeslots consumed by the carrier loop
    pub elapsed_slots: u32,
}

/// One transmission session.
///
/// # Invariants
///
/// - The key chain loses exactly one index per transmitted carrier frame
/// - The accumulator exists iff the level transmits a filter, and is
///   sized once from the level's byte budget
/// - A session runs at most once; after `run` it is `Done` or `Failed`
pub struct ProtocolSession {
    config: SessionConfig,
    chain: KeyChain,
    accumulator: Option<BloomAccumulator>,
    phase: SessionPhase,
}

impl ProtocolSession {
    /// Build a session: derive the seed, draw the chain length from
    /// `rng`, compute the commitment, and size the filter.
    ///
    /// # Errors
    ///
    /// - [`SessionError::KeyChain`] if chain construction fails
    pub fn new(config: SessionConfig, rng: &mut impl Rng) -> Result<Self, SessionError> {
        let chain_length = rng.gen_range(CHAIN_LENGTH_MIN..CHAIN_LENGTH_MAX);
        let seed = config.seed_provider.derive();
        let chain = KeyChain::new(seed, chain_length)?;

        let accumulator = config.level.uses_filter().then(|| {
            BloomAccumulator::new(
                config.level.bloom_byte_budget(),
                config.level.profile().carrier_message_count,
            )
        });

        tracing::debug!(
            level = %config.level,
            chain_length,
            filter = accumulator.is_some(),
            "session constructed"
        );

        Ok(Self { config, chain, accumulator, phase: SessionPhase::Init })
    }

    /// Commitment material for the out-of-band verifier handshake.
    #[must_use]
    pub fn announcement(&self) -> CommitmentAnnouncement {
        CommitmentAnnouncement {
            commitment: self.chain.commitment(),
            chain_length: self.chain.chain_length(),
            level: self.config.level,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Bloom accumulator state, if the level carries a filter.
    #[must_use]
    pub fn accumulator(&self) -> Option<&BloomAccumulator> {
        self.accumulator.as_ref()
    }

    /// Drive the session to completion through `transport`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Transport`] aborts immediately on any send
    ///   failure, with no retry
    /// - [`SessionError::KeyChainIntegrity`] if the final self-check
    ///   fails
    /// - Other variants surface defects in configuration or arithmetic
    pub fn run(&mut self, transport: &mut impl Transport) -> Result<SessionReport, SessionError> {
        let outcome = self.execute(transport);
        self.phase = match outcome {
            Ok(_) => SessionPhase::Done,
            Err(_) => SessionPhase::Failed,
        };
        outcome
    }

    fn execute(&mut self, transport: &mut impl Transport) -> Result<SessionReport, SessionError> {
        let profile = self.config.level.profile();
        let mut transcript = Vec::new();
        let mut frames_sent = 0usize;

        self.enter(SessionPhase::SendCarrier);
        for slot in 0..profile.carrier_message_count {
            let frame = RenderedFrame::from(&self.config.carrier.encode()?);
            transport.send(&frame)?;
            frames_sent += 1;
            self.chain.advance_slot()?;
            if let Some(accumulator) = self.accumulator.as_mut() {
                accumulator.add(frame.as_bytes());
            }
            transcript.extend_from_slice(frame.as_bytes());
            tracing::trace!(slot = slot + 1, bits = frame.bit_len(), "carrier frame sent");
        }

        self.enter(SessionPhase::DeriveKey);
        let key = self.chain.current_key();

        self.enter(SessionPhase::ComputeTag);
        let tag = authentication_tag(
            profile.input_digest,
            key.as_bytes(),
            &transcript,
            profile.output_digest_size,
        )?;

        self.enter(SessionPhase::EncodePayload);
        let filter_bits = self.accumulator.as_ref().map(BloomAccumulator::serialize);
        let payloads = encode_auth_payloads(self.config.level, &key, &tag, filter_bits)?;

        self.enter(SessionPhase::Transmit);
        for payload in &payloads {
            for frame_bits in self.config.broadcast.encode_fragments(payload)? {
                let frame = RenderedFrame::from(&frame_bits);
                transport.send(&frame)?;
                frames_sent += 1;
                tracing::trace!(bits = frame.bit_len(), "authenticated frame sent");
            }
        }

        self.enter(SessionPhase::SelfVerify);
        if !self.chain.self_verify() {
            return Err(SessionError::KeyChainIntegrity {
                elapsed: self.chain.elapsed_slots(),
                chain_length: self.chain.chain_length(),
            });
        }

        tracing::info!(
            level = %self.config.level,
            frames_sent,
            elapsed_slots = self.chain.elapsed_slots(),
            "session complete"
        );

        Ok(SessionReport {
            level: self.config.level,
            frames_sent,
            disclosed_key: key,
            tag,
            elapsed_slots: self.chain.elapsed_slots(),
        })
    }

    fn enter(&mut self, phase: SessionPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }
}
