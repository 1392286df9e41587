mod redpanda;

pub use redpanda::TriggerConsumer;
