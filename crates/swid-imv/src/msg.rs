//! Message exchange wrapper.
//!
//! An [`ImvMessage`] binds one inbound or outbound protocol message to its
//! connection and addressing. Inbound messages decode raw bytes into typed
//! attributes, reporting a fatal decode distinctly from ordinary success;
//! outbound messages collect attributes and transmit them either as a
//! non-terminal batch or as the terminal assessment of the evaluation
//! round.

use crate::error::{ImvError, ImvResult};
use crate::ports::outbound::ImvTransport;
use std::sync::Arc;
use swid_attrs::SwidAttribute;
use tnc_types::{ConnectionId, ImcId, ImvId, MessageSubtype, VendorId};

/// Addressing of one message exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Addressing {
    /// Legacy short addressing: a single combined message type value.
    Short { message_type: u32 },
    /// Long addressing with explicit endpoints and vendor-scoped subtype.
    Long {
        imc_id: u32,
        imv_id: ImvId,
        vendor: VendorId,
        subtype: MessageSubtype,
    },
}

/// How a batch relates to the connection's evaluation round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchDisposition {
    /// More batches expected from this module. `exclusive` lets a module
    /// override concurrently pending sibling batches; this verifier
    /// always sends non-exclusive.
    More { exclusive: bool },
    /// Terminal batch: the host will solicit a recommendation afterwards
    /// instead of expecting further attributes from this module.
    Assessment,
}

/// One encoded batch handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundBatch {
    pub connection: ConnectionId,
    pub addressing: Addressing,
    pub data: Vec<u8>,
    pub disposition: BatchDisposition,
}

/// Outcome of decoding an inbound message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiveOutcome {
    /// Decoding hit a fatal condition (malformed input or an unsupported
    /// mandatory attribute). Attributes decoded before the failure point
    /// are still available for interpretation.
    pub fatal_error: bool,
}

/// One message exchange bound to a connection.
pub struct ImvMessage {
    transport: Arc<dyn ImvTransport>,
    connection: ConnectionId,
    addressing: Addressing,
    raw: Option<Vec<u8>>,
    attributes: Vec<SwidAttribute>,
}

impl ImvMessage {
    /// Fresh outbound message from this verifier to any collector.
    pub fn outbound(
        transport: Arc<dyn ImvTransport>,
        connection: ConnectionId,
        imv_id: ImvId,
    ) -> Self {
        Self {
            transport,
            connection,
            addressing: Addressing::Long {
                imc_id: ImcId::ANY.0,
                imv_id,
                vendor: VendorId::TCG,
                subtype: MessageSubtype::TCG_SWID,
            },
            raw: None,
            attributes: Vec::new(),
        }
    }

    /// Inbound message with short addressing.
    pub fn from_data(
        transport: Arc<dyn ImvTransport>,
        connection: ConnectionId,
        message_type: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            transport,
            connection,
            addressing: Addressing::Short { message_type },
            raw: Some(data),
            attributes: Vec::new(),
        }
    }

    /// Inbound message with long addressing.
    pub fn from_long_data(
        transport: Arc<dyn ImvTransport>,
        connection: ConnectionId,
        imc_id: u32,
        imv_id: ImvId,
        vendor: VendorId,
        subtype: MessageSubtype,
        data: Vec<u8>,
    ) -> Self {
        Self {
            transport,
            connection,
            addressing: Addressing::Long {
                imc_id,
                imv_id,
                vendor,
                subtype,
            },
            raw: Some(data),
            attributes: Vec::new(),
        }
    }

    /// Fresh outbound message correlated to this inbound message's
    /// connection and addressing, used for error replies.
    pub fn create_as_reply(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            connection: self.connection,
            addressing: self.addressing.clone(),
            raw: None,
            attributes: Vec::new(),
        }
    }

    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    /// Decode the raw inbound payload into the attribute collection.
    ///
    /// Fails only when there is no payload to decode (a message that was
    /// never received); a malformed payload is reported through
    /// [`ReceiveOutcome::fatal_error`] with the salvageable attributes
    /// retained.
    pub fn receive(&mut self) -> ImvResult<ReceiveOutcome> {
        let raw = self.raw.as_ref().ok_or_else(|| ImvError::ReceiveFailed {
            reason: "message carries no inbound payload".to_string(),
        })?;

        let decoded = swid_attrs::decode_message(raw);
        if let Some(ref err) = decoded.fatal {
            tracing::warn!(connection = %self.connection, error = %err,
                "fatal error while parsing inbound message");
        }
        let fatal_error = decoded.is_fatal();
        self.attributes = decoded.attributes;
        Ok(ReceiveOutcome { fatal_error })
    }

    /// Iterate the decoded attributes in wire order. Finite, single-pass,
    /// restartable by calling again.
    pub fn attributes(&self) -> impl Iterator<Item = &SwidAttribute> {
        self.attributes.iter()
    }

    /// Append one attribute to this outbound-in-progress message.
    pub fn add_attribute(&mut self, attr: SwidAttribute) {
        self.attributes.push(attr);
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Transmit as a non-terminal batch.
    pub fn send(&self, exclusive: bool) -> ImvResult<()> {
        self.transport.send(self.batch(BatchDisposition::More { exclusive }))
    }

    /// Transmit as the terminal assessment of this connection's
    /// evaluation round.
    pub fn send_assessment(&self) -> ImvResult<()> {
        self.transport.send(self.batch(BatchDisposition::Assessment))
    }

    fn batch(&self, disposition: BatchDisposition) -> OutboundBatch {
        OutboundBatch {
            connection: self.connection,
            addressing: self.addressing.clone(),
            data: swid_attrs::encode_message(&self.attributes),
            disposition,
        }
    }
}
