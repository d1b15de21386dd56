//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements         | Connects to                  |
//! |---------------|--------------------|------------------------------|
//! | `sim_sensor`  | MotionSensorPort   | Simulated accelerometer FIFO |
//! | `replay`      | —                  | JSON-lines sample traces     |
//! | `kv_store`    | StoragePort        | In-memory / JSON file store  |
//! |               | ConfigPort         |                              |
//! | `random`      | RandomPort         | Process-seeded hasher        |
//! | `log_sink`    | EventSink          | `log` facade                 |
//! | `console_log` | `log::Log`         | stdout / stderr              |

pub mod console_log;
pub mod kv_store;
pub mod log_sink;
pub mod random;
pub mod replay;
pub mod sim_sensor;
