//! # Driving Ports (API - Inbound)
//!
//! The host callback surface this verifier implements. The host invokes
//! these at well-defined points: connection state change, message
//! received (short or long addressing), batch ending, and recommendation
//! solicitation. Every call is short, synchronous and non-suspending.

use crate::error::ImvResult;
use tnc_types::{ConnectionId, ConnectionStateChange, ImvId, MessageSubtype, VendorId};

/// Primary verifier API.
///
/// This is the driving port of the SWID verifier subsystem. One instance
/// serves all connections of the host; per-connection state lives in the
/// host's registry.
pub trait ImvApi: Send + Sync {
    /// Connection lifecycle notification.
    ///
    /// Create allocates per-connection state, Delete releases it, every
    /// other transition forwards opaquely to the host.
    fn notify_connection_change(
        &self,
        connection: ConnectionId,
        change: ConnectionStateChange,
    ) -> ImvResult<()>;

    /// Inbound message with short addressing.
    fn receive_message(
        &self,
        connection: ConnectionId,
        message_type: u32,
        data: Vec<u8>,
    ) -> ImvResult<()>;

    /// Inbound message with long addressing (explicit source collector,
    /// destination verifier, vendor and subtype).
    #[allow(clippy::too_many_arguments)]
    fn receive_message_long(
        &self,
        connection: ConnectionId,
        src_imc: u32,
        dst_imv: ImvId,
        vendor: VendorId,
        subtype: MessageSubtype,
        data: Vec<u8>,
    ) -> ImvResult<()>;

    /// Called once per message-exchange round, before transmission. The
    /// verifier decides whether to issue requests, wait, or finalize.
    fn batch_ending(&self, connection: ConnectionId) -> ImvResult<()>;

    /// Ask the verifier to deliver its recommendation for a connection.
    fn solicit_recommendation(&self, connection: ConnectionId) -> ImvResult<()>;
}
