//! SWID verifier service - core handshake logic.
//!
//! Drives one state machine per connection: issue tag inventory requests
//! at the first batch boundary, correlate inventory responses to pending
//! work items by request id, and finalize with a terminal assessment once
//! no owned work remains.

use crate::domain::{ConnectionState, HandshakePhase, SharedConnectionState, WorkItemType};
use crate::error::{ImvError, ImvResult};
use crate::msg::ImvMessage;
use crate::ports::inbound::ImvApi;
use crate::ports::outbound::{ImvHost, ImvTransport, WorkItemSession, WorkItemStore};
use std::sync::Arc;
use swid_attrs::{RequestFlags, SwidAttribute, TagIdInventory, TagInventoryRequest};
use tnc_types::{
    ActionRecommendation, ConnectionId, ConnectionStateChange, EvaluationResult, ImvId,
    MessageSubtype, VendorId,
};

/// Explicit verifier context, passed in at construction.
///
/// Replaces any process-wide registration global: the engine knows its
/// host-assigned id and display name, nothing ambient.
#[derive(Clone, Debug)]
pub struct ImvContext {
    /// Display name used in log output.
    pub name: String,
    /// Id the host assigned to this verifier module.
    pub imv_id: ImvId,
}

impl ImvContext {
    pub fn new(name: impl Into<String>, imv_id: ImvId) -> Self {
        Self {
            name: name.into(),
            imv_id,
        }
    }
}

/// SWID verifier service implementation.
///
/// Implements the host callback surface ([`ImvApi`]) on top of the three
/// outbound collaborators: the host engine, the persistent work-item
/// store, and the message transport.
pub struct SwidImvService<H, D, T>
where
    H: ImvHost,
    D: WorkItemStore,
    T: ImvTransport,
{
    context: ImvContext,
    host: Arc<H>,
    store: Arc<D>,
    transport: Arc<T>,
}

impl<H, D, T> SwidImvService<H, D, T>
where
    H: ImvHost,
    D: WorkItemStore,
    T: ImvTransport + 'static,
{
    /// Create a new verifier service.
    pub fn new(context: ImvContext, host: Arc<H>, store: Arc<D>, transport: Arc<T>) -> Self {
        Self {
            context,
            host,
            store,
            transport,
        }
    }

    pub fn context(&self) -> &ImvContext {
        &self.context
    }

    fn state_for(&self, connection: ConnectionId) -> ImvResult<SharedConnectionState> {
        self.host
            .get_state(connection)
            .ok_or(ImvError::StateNotFound { connection })
    }

    fn transport_handle(&self) -> Arc<dyn ImvTransport> {
        self.transport.clone()
    }

    fn deliver_recommendation(&self, state: &SharedConnectionState) -> ImvResult<()> {
        let (connection, rec, eval) = {
            let guard = state.read();
            let (rec, eval) = guard.recommendation();
            (guard.connection(), rec, eval)
        };
        self.host.provide_recommendation(connection, rec, eval)
    }

    /// Interpret one received message.
    ///
    /// Both addressing variants funnel here. A fatal parse still
    /// interprets whatever attributes were salvaged, then unconditionally
    /// fails the connection gracefully with an error assessment.
    fn handle_message(
        &self,
        state: &SharedConnectionState,
        mut in_msg: ImvMessage,
    ) -> ImvResult<()> {
        let outcome = in_msg.receive()?;
        let session = state.read().session();

        for attr in in_msg.attributes() {
            if attr.vendor() != VendorId::TCG {
                continue;
            }
            match attr {
                SwidAttribute::TagIdInventory(inv) => {
                    self.handle_tag_id_inventory(state, session.as_ref(), inv);
                }
                SwidAttribute::TagInventory => {
                    // Full tag inventories are recognized but unconsumed.
                }
                _ => {}
            }
        }

        if outcome.fatal_error {
            state.write().set_recommendation(
                ActionRecommendation::NoRecommendation,
                EvaluationResult::Error,
            );
            let reply = in_msg.create_as_reply();
            reply.send_assessment()?;
            return self.deliver_recommendation(state);
        }

        Ok(())
    }

    fn handle_tag_id_inventory(
        &self,
        state: &SharedConnectionState,
        session: Option<&Arc<dyn WorkItemSession>>,
        inv: &TagIdInventory,
    ) {
        tracing::debug!(imv = %self.context.name, request = inv.request_id,
            "received SWID tag ID inventory");
        for tag in &inv.tag_ids {
            tracing::trace!("  {tag}");
        }

        if inv.request_id == 0 {
            // TODO: act on subscribed inventories (request id zero)
            return;
        }

        let found = session.and_then(|s| s.complete(inv.request_id));
        let Some(mut item) = found else {
            tracing::warn!(request = inv.request_id,
                "no workitem found for SWID tag ID inventory");
            return;
        };

        let rec = item.set_result(
            "received SWID tag ID inventory",
            EvaluationResult::Compliant,
        );
        state
            .write()
            .update_recommendation(rec, EvaluationResult::Compliant);
        if let Err(err) = self.store.finalize(&item) {
            tracing::warn!(request = inv.request_id, error = %err,
                "failed to finalize workitem");
        }
    }
}

impl<H, D, T> ImvApi for SwidImvService<H, D, T>
where
    H: ImvHost + 'static,
    D: WorkItemStore + 'static,
    T: ImvTransport + 'static,
{
    fn notify_connection_change(
        &self,
        connection: ConnectionId,
        change: ConnectionStateChange,
    ) -> ImvResult<()> {
        match change {
            ConnectionStateChange::Create => {
                self.host.create_state(ConnectionState::new(connection))
            }
            ConnectionStateChange::Delete => self.host.delete_state(connection),
            other => self.host.change_state(connection, other),
        }
    }

    fn receive_message(
        &self,
        connection: ConnectionId,
        message_type: u32,
        data: Vec<u8>,
    ) -> ImvResult<()> {
        let state = self.state_for(connection)?;
        let in_msg = ImvMessage::from_data(self.transport_handle(), connection, message_type, data);
        self.handle_message(&state, in_msg)
    }

    fn receive_message_long(
        &self,
        connection: ConnectionId,
        src_imc: u32,
        dst_imv: ImvId,
        vendor: VendorId,
        subtype: MessageSubtype,
        data: Vec<u8>,
    ) -> ImvResult<()> {
        let state = self.state_for(connection)?;
        let in_msg = ImvMessage::from_long_data(
            self.transport_handle(),
            connection,
            src_imc,
            dst_imv,
            vendor,
            subtype,
            data,
        );
        self.handle_message(&state, in_msg)
    }

    fn batch_ending(&self, connection: ConnectionId) -> ImvResult<()> {
        let state = self.state_for(connection)?;
        if state.read().phase().is_end() {
            return Ok(());
        }

        // Empty out message addressed to any collector - we might need it.
        let mut out_msg =
            ImvMessage::outbound(self.transport_handle(), connection, self.context.imv_id);

        let Some(session) = state.read().session() else {
            tracing::debug!(%connection,
                "no workitems available - no evaluation possible");
            state.write().set_recommendation(
                ActionRecommendation::Allow,
                EvaluationResult::DontKnow,
            );
            let sent = out_msg.send_assessment();
            state.write().advance_phase(HandshakePhase::End);
            sent?;
            return self.deliver_recommendation(&state);
        };

        let mut phase = state.read().phase();

        if phase == HandshakePhase::Init {
            let mut no_workitems = true;
            for item in session.workitems() {
                if !item.is_unclaimed() || item.item_type != WorkItemType::SwidTags {
                    continue;
                }
                if !session.claim(item.id, self.context.imv_id) {
                    continue;
                }
                tracing::debug!(imv = %self.context.name, request = item.id,
                    "issuing SWID tag request");
                let flags = RequestFlags::from_arg_str(&item.arg);
                out_msg.add_attribute(SwidAttribute::InventoryRequest(
                    TagInventoryRequest::new(flags, item.id),
                ));
                no_workitems = false;
            }
            if no_workitems {
                tracing::debug!(imv = %self.context.name,
                    "no workitems - no evaluation requested");
                state.write().set_recommendation(
                    ActionRecommendation::Allow,
                    EvaluationResult::DontKnow,
                );
            }
            state.write().advance_phase(HandshakePhase::Workitems);
            phase = HandshakePhase::Workitems;
        }

        // All owned workitems finalized?
        if phase == HandshakePhase::Workitems && session.owned_count(self.context.imv_id) == 0 {
            let sent = out_msg.send_assessment();
            state.write().advance_phase(HandshakePhase::End);
            sent?;
            return self.deliver_recommendation(&state);
        }

        if out_msg.attribute_count() > 0 {
            out_msg.send(false)?;
        }
        Ok(())
    }

    fn solicit_recommendation(&self, connection: ConnectionId) -> ImvResult<()> {
        let state = self.state_for(connection)?;
        self.deliver_recommendation(&state)
    }
}
