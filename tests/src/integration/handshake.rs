//! # Verifier Handshake Flows
//!
//! Drives `SwidImvService` through the same callback sequence a host
//! engine produces: connection lifecycle, batch boundaries, inbound
//! collector messages, and recommendation solicitation.
//!
//! ## Flows Tested
//!
//! 1. **Happy path**: work items turn into requests, inventories complete
//!    them, the connection ends with an Allow/Compliant assessment
//! 2. **Degradation**: malformed input and storage failures end the
//!    handshake gracefully instead of aborting it
//! 3. **Coexistence**: foreign work-item types pass through untouched

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use swid_attrs::{RequestFlags, SwidAttribute, TagId, TagIdInventory};
    use swid_imv::ports::inbound::ImvApi;
    use swid_imv::{BatchDisposition, ImvContext, SwidImvService, WorkItem, WorkItemType};
    use tnc_types::{
        ActionRecommendation, ConnectionId, ConnectionStateChange, EvaluationResult, ImvId,
    };

    use crate::integration::harness::{
        init_tracing, InMemoryHost, InMemoryRegistry, InMemoryStore, RecordingTransport,
    };

    const CONN: ConnectionId = ConnectionId(7);
    const IMV: ImvId = ImvId(1);

    struct Testbed {
        service: SwidImvService<InMemoryHost, InMemoryStore, RecordingTransport>,
        host: Arc<InMemoryHost>,
        registry: Arc<InMemoryRegistry>,
        store: Arc<InMemoryStore>,
        transport: Arc<RecordingTransport>,
    }

    /// Wire up a service, register the connection and attach the session,
    /// mirroring the host's Create-then-handshake sequence.
    fn testbed(items: Vec<WorkItem>) -> Testbed {
        init_tracing();
        let host = Arc::new(InMemoryHost::default());
        let registry = InMemoryRegistry::seeded(items);
        let store = Arc::new(InMemoryStore::default());
        let transport = Arc::new(RecordingTransport::default());
        let service = SwidImvService::new(
            ImvContext::new("SWID", IMV),
            host.clone(),
            store.clone(),
            transport.clone(),
        );

        service
            .notify_connection_change(CONN, ConnectionStateChange::Create)
            .unwrap();
        if let Some(state) = host.state(CONN) {
            state.write().set_session(registry.clone());
        }

        Testbed {
            service,
            host,
            registry,
            store,
            transport,
        }
    }

    /// Extract the inventory requests from the last outbound batch, the
    /// way a collector on the other end would.
    fn requests_in(batch: &swid_imv::OutboundBatch) -> Vec<(u32, RequestFlags)> {
        swid_attrs::decode_message(&batch.data)
            .attributes
            .iter()
            .filter_map(|attr| match attr {
                SwidAttribute::InventoryRequest(req) => Some((req.request_id, req.flags)),
                _ => None,
            })
            .collect()
    }

    /// Encode a collector's inventory response for one request id.
    fn inventory_reply(request_id: u32) -> Vec<u8> {
        swid_attrs::encode_message(&[SwidAttribute::TagIdInventory(TagIdInventory::new(
            request_id,
            vec![
                TagId::new("strongswan.org", "strongSwan-5-2-0"),
                TagId::new("ubuntu.com", "openssl-1-0-1f"),
            ],
        ))])
    }

    #[test]
    fn test_full_handshake_ends_with_allow_compliant() {
        let t = testbed(vec![
            WorkItem::new(1, WorkItemType::SwidTags, "R"),
            WorkItem::new(2, WorkItemType::SwidTags, "RSC"),
        ]);

        // Round one: the verifier claims both items and requests inventories.
        t.service.batch_ending(CONN).unwrap();
        let first = t.transport.last().unwrap();
        assert_eq!(first.disposition, BatchDisposition::More { exclusive: false });
        let requests = requests_in(&first);
        assert_eq!(requests.len(), 2);
        assert!(requests[1].1.contains(RequestFlags::R));
        assert!(requests[1].1.contains(RequestFlags::S));
        assert!(requests[1].1.contains(RequestFlags::C));

        // The collector answers both requests.
        for (request_id, _) in &requests {
            t.service
                .receive_message(CONN, 0, inventory_reply(*request_id))
                .unwrap();
        }

        // Round two: nothing owned remains, terminal assessment goes out.
        t.service.batch_ending(CONN).unwrap();
        let last = t.transport.last().unwrap();
        assert_eq!(last.disposition, BatchDisposition::Assessment);

        assert_eq!(
            t.host.recommendations(),
            vec![(CONN, ActionRecommendation::Allow, EvaluationResult::Compliant)]
        );
        let finalized = t.store.finalized();
        assert_eq!(finalized.len(), 2);
        assert!(finalized
            .iter()
            .all(|i| i.evaluation == Some(EvaluationResult::Compliant)));
        assert!(t.registry.pending().is_empty());

        // Lifecycle teardown releases the state.
        t.service
            .notify_connection_change(CONN, ConnectionStateChange::Delete)
            .unwrap();
        assert!(t.host.state(CONN).is_none());
    }

    #[test]
    fn test_foreign_workitem_types_pass_through_untouched() {
        let t = testbed(vec![
            WorkItem::new(1, WorkItemType::SwidTags, ""),
            WorkItem::new(2, WorkItemType::Other(12), "tcp"),
        ]);

        t.service.batch_ending(CONN).unwrap();
        let requests = requests_in(&t.transport.last().unwrap());
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, 1);

        t.service
            .receive_message(CONN, 0, inventory_reply(1))
            .unwrap();
        t.service.batch_ending(CONN).unwrap();

        // The SWID item is done, the foreign item is still pending and
        // still unclaimed by this module.
        let pending = t.registry.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, 2);
        assert!(pending[0].is_unclaimed());
        assert_eq!(
            t.transport.last().unwrap().disposition,
            BatchDisposition::Assessment
        );
    }

    #[test]
    fn test_connection_without_session_allows_with_dont_know() {
        let host = Arc::new(InMemoryHost::default());
        let store = Arc::new(InMemoryStore::default());
        let transport = Arc::new(RecordingTransport::default());
        let service = SwidImvService::new(
            ImvContext::new("SWID", IMV),
            host.clone(),
            store,
            transport.clone(),
        );
        service
            .notify_connection_change(CONN, ConnectionStateChange::Create)
            .unwrap();

        service.batch_ending(CONN).unwrap();

        assert_eq!(
            transport.last().unwrap().disposition,
            BatchDisposition::Assessment
        );
        assert_eq!(
            host.recommendations(),
            vec![(CONN, ActionRecommendation::Allow, EvaluationResult::DontKnow)]
        );
    }

    #[test]
    fn test_malformed_message_ends_with_error_assessment() {
        let t = testbed(vec![WorkItem::new(1, WorkItemType::SwidTags, "")]);
        t.service.batch_ending(CONN).unwrap();

        t.service
            .receive_message(CONN, 0, vec![0x00, 0x01, 0x02])
            .unwrap();

        assert_eq!(
            t.transport.last().unwrap().disposition,
            BatchDisposition::Assessment
        );
        assert_eq!(
            t.host.recommendations(),
            vec![(
                CONN,
                ActionRecommendation::NoRecommendation,
                EvaluationResult::Error
            )]
        );
    }

    #[test]
    fn test_storage_failure_does_not_abort_the_handshake() {
        let t = testbed(vec![WorkItem::new(1, WorkItemType::SwidTags, "")]);
        t.service.batch_ending(CONN).unwrap();
        t.store.break_storage();

        t.service
            .receive_message(CONN, 0, inventory_reply(1))
            .unwrap();
        t.service.batch_ending(CONN).unwrap();

        // Nothing persisted, but the connection still finished compliant.
        assert!(t.store.finalized().is_empty());
        assert_eq!(
            t.host.recommendations(),
            vec![(CONN, ActionRecommendation::Allow, EvaluationResult::Compliant)]
        );
    }

    #[test]
    fn test_finished_handshake_stays_finished() {
        let t = testbed(vec![WorkItem::new(1, WorkItemType::SwidTags, "")]);
        t.service.batch_ending(CONN).unwrap();
        t.service
            .receive_message(CONN, 0, inventory_reply(1))
            .unwrap();
        t.service.batch_ending(CONN).unwrap();
        let batches_after_end = t.transport.sent().len();

        t.service.batch_ending(CONN).unwrap();
        t.service.batch_ending(CONN).unwrap();

        assert_eq!(t.transport.sent().len(), batches_after_end);
        assert_eq!(t.host.recommendations().len(), 1);
    }

    #[test]
    fn test_solicitation_repeats_the_current_verdict() {
        let t = testbed(vec![]);
        t.service.batch_ending(CONN).unwrap();
        t.service.solicit_recommendation(CONN).unwrap();

        let recs = t.host.recommendations();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], recs[1]);
    }

    #[test]
    fn test_unsolicited_inventory_leaves_workitems_pending() {
        let t = testbed(vec![WorkItem::new(1, WorkItemType::SwidTags, "")]);
        t.service.batch_ending(CONN).unwrap();

        // Request id zero marks a subscription report, not an answer.
        t.service
            .receive_message(CONN, 0, inventory_reply(0))
            .unwrap();

        assert_eq!(t.registry.pending().len(), 1);
        assert!(t.store.finalized().is_empty());
        // The handshake is still waiting on the real answer.
        t.service.batch_ending(CONN).unwrap();
        assert!(t.host.recommendations().is_empty());
    }
}
