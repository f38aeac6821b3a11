mod counting_registry;
mod participant;
mod recording_channel;

pub use counting_registry::{CountingRegistry, RegistryHandle};
pub use participant::{TestParticipant, BALL};
pub use recording_channel::{deliver_all, FailingChannel, RecordingChannel, SentEvent, SentLog};
pub use shared_body::SharedBody;
pub use test_membership::{MembershipHandle, TestMembership};
