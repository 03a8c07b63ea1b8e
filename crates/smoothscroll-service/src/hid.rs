//! hidapi-backed wheel transport.
//!
//! A dedicated poll thread owns the `HidApi` context and every open device
//! handle: it re-enumerates on a fixed cadence to detect attach/detach,
//! reads input reports with a short timeout, and drains a queue of outbound
//! reports. The async side only ever touches channels.

use std::collections::HashMap;
use std::sync::mpsc as std_mpsc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use hid_wheel_protocol::{PRODUCT_ID, RAW_USAGE, RAW_USAGE_PAGE, REPORT_LEN, VENDOR_ID};
use hidapi::{DeviceInfo, HidApi, HidDevice};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::transport::{DeviceId, TransportError, TransportEvent, WheelTransport};

/// How often the poll thread re-enumerates for attach/detach.
const ENUMERATE_PERIOD: Duration = Duration::from_millis(500);
/// Blocking read timeout per device, per poll iteration.
const READ_TIMEOUT_MS: i32 = 5;
/// Sleep between iterations while no device is attached.
const IDLE_SLEEP: Duration = Duration::from_millis(50);

type Outbound = (DeviceId, [u8; REPORT_LEN]);

/// [`WheelTransport`] over hidapi.
#[derive(Default)]
pub struct HidApiTransport {
    outbound: Option<std_mpsc::Sender<Outbound>>,
}

impl HidApiTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WheelTransport for HidApiTransport {
    async fn start(&mut self) -> Result<mpsc::UnboundedReceiver<TransportEvent>, TransportError> {
        let api = HidApi::new().map_err(|err| TransportError::Unavailable(err.to_string()))?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = std_mpsc::channel();
        self.outbound = Some(outbound_tx);

        std::thread::Builder::new()
            .name("hid-poll".into())
            .spawn(move || poll_loop(api, &event_tx, &outbound_rx))
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;

        Ok(event_rx)
    }

    fn send_report(&self, id: &DeviceId, report: &[u8; REPORT_LEN]) -> Result<(), TransportError> {
        let Some(outbound) = &self.outbound else {
            return Err(TransportError::Write {
                id: id.clone(),
                reason: "transport not started".into(),
            });
        };
        outbound
            .send((id.clone(), *report))
            .map_err(|_| TransportError::Write {
                id: id.clone(),
                reason: "poll thread stopped".into(),
            })
    }
}

fn matches_wheel(info: &DeviceInfo) -> bool {
    info.vendor_id() == VENDOR_ID
        && info.product_id() == PRODUCT_ID
        && info.usage_page() == RAW_USAGE_PAGE
        && info.usage() == RAW_USAGE
}

fn device_id(info: &DeviceInfo) -> DeviceId {
    info.path().to_string_lossy().into_owned()
}

fn poll_loop(
    mut api: HidApi,
    events: &mpsc::UnboundedSender<TransportEvent>,
    outbound: &std_mpsc::Receiver<Outbound>,
) {
    let mut open: HashMap<DeviceId, HidDevice> = HashMap::new();
    let mut next_enumerate = Instant::now();
    let mut buf = [0u8; 64];

    info!("HID poll thread started");

    // The daemon dropping its event receiver is the stop signal.
    while !events.is_closed() {
        if Instant::now() >= next_enumerate {
            next_enumerate = Instant::now() + ENUMERATE_PERIOD;
            enumerate(&mut api, &mut open, events);
        }

        while let Ok((id, report)) = outbound.try_recv() {
            write_report(&open, &id, &report);
        }

        if open.is_empty() {
            std::thread::sleep(IDLE_SLEEP);
            continue;
        }

        for (id, device) in &open {
            match device.read_timeout(&mut buf, READ_TIMEOUT_MS) {
                Ok(0) => {}
                Ok(n) => {
                    let _ = events.send(TransportEvent::Report {
                        id: id.clone(),
                        data: buf[..n].to_vec(),
                    });
                }
                // Read errors usually precede removal; the next enumeration
                // pass emits the Detached event.
                Err(err) => debug!(device = %id, error = %err, "report read failed"),
            }
        }
    }

    info!("HID poll thread stopped");
}

fn enumerate(
    api: &mut HidApi,
    open: &mut HashMap<DeviceId, HidDevice>,
    events: &mpsc::UnboundedSender<TransportEvent>,
) {
    if let Err(err) = api.refresh_devices() {
        warn!(error = %err, "device enumeration failed");
        return;
    }

    let mut present: Vec<DeviceId> = Vec::new();
    for info in api.device_list().filter(|info| matches_wheel(info)) {
        let id = device_id(info);
        present.push(id.clone());
        if open.contains_key(&id) {
            continue;
        }
        match info.open_device(api) {
            Ok(device) => {
                open.insert(id.clone(), device);
                let _ = events.send(TransportEvent::Attached {
                    id,
                    product: info.product_string().map(str::to_owned),
                });
            }
            Err(err) => warn!(device = %id, error = %err, "failed to open device"),
        }
    }

    open.retain(|id, _| {
        if present.contains(id) {
            true
        } else {
            let _ = events.send(TransportEvent::Detached { id: id.clone() });
            false
        }
    });
}

fn write_report(open: &HashMap<DeviceId, HidDevice>, id: &DeviceId, report: &[u8; REPORT_LEN]) {
    let Some(device) = open.get(id) else {
        warn!(device = %id, "outbound report for detached device dropped");
        return;
    };

    // hidapi expects the report ID as the first byte; the raw-HID interface
    // uses report ID 0.
    let mut framed = [0u8; REPORT_LEN + 1];
    framed[1..].copy_from_slice(report);
    if let Err(err) = device.write(&framed) {
        warn!(device = %id, error = %err, "outbound report write failed");
    }
}
