// Locating the meter's hidraw device node
//
// The meter is matched on the USB vendor/product attributes exported by
// sysfs for the USB device that owns each hidraw interface.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Vendor id of the PeakTech 2025, as reported in sysfs `idVendor`.
///
/// These are compared as literal strings. Whether "2571"/"4100" are the
/// intended hex ids has not been confirmed on hardware.
pub const PEAKTECH_2025_VENDOR_ID: &str = "2571";
pub const PEAKTECH_2025_PRODUCT_ID: &str = "4100";

lazy_static! {
    static ref USB_ID_RE: Regex =
        Regex::new(r"^\s*([0-9A-Fa-f]{4})\s*:\s*([0-9A-Fa-f]{4})\s*$").unwrap();
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("IO error while scanning {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid device id: {0} (expected VVVV:PPPP)")]
    InvalidDeviceId(String),

    #[error("Matching device has no device node at {}", .0.display())]
    MissingDeviceNode(PathBuf),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// USB vendor/product identifier pair, kept as the text sysfs reports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "UsbIdFields")]
pub struct UsbId {
    pub vendor: String,
    pub product: String,
}

#[derive(Deserialize)]
struct UsbIdFields {
    vendor: String,
    product: String,
}

impl From<UsbIdFields> for UsbId {
    fn from(fields: UsbIdFields) -> Self {
        Self::new(fields.vendor, fields.product)
    }
}

impl UsbId {
    /// sysfs prints ids in lower case, so hex letters are folded here
    pub fn new(vendor: impl Into<String>, product: impl Into<String>) -> Self {
        let (vendor, product): (String, String) = (vendor.into(), product.into());
        Self {
            vendor: vendor.to_ascii_lowercase(),
            product: product.to_ascii_lowercase(),
        }
    }

    pub fn peaktech_2025() -> Self {
        Self::new(PEAKTECH_2025_VENDOR_ID, PEAKTECH_2025_PRODUCT_ID)
    }

    /// Parse "VVVV:PPPP" (e.g. "2571:4100")
    pub fn parse(s: &str) -> Result<Self> {
        let caps = USB_ID_RE
            .captures(s)
            .ok_or_else(|| DiscoveryError::InvalidDeviceId(s.to_string()))?;

        Ok(Self::new(&caps[1], &caps[2]))
    }

    /// Compare against sysfs attribute text
    pub fn matches(&self, vendor: &str, product: &str) -> bool {
        self.vendor == vendor.trim() && self.product == product.trim()
    }
}

impl Default for UsbId {
    fn default() -> Self {
        Self::peaktech_2025()
    }
}

impl fmt::Display for UsbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor, self.product)
    }
}

/// Resolves a vendor/product pair to the device node to open
pub trait DeviceResolver {
    /// `Ok(None)` when no attached device matches
    fn resolve(&self, id: &UsbId) -> Result<Option<PathBuf>>;
}

/// A hidraw interface and the USB device it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HidrawDevice {
    /// Entry under `class/hidraw`
    pub sys_path: PathBuf,
    /// Device node, e.g. /dev/hidraw0
    pub node: PathBuf,
    pub id: UsbId,
}

/// Linux sysfs scanner
#[derive(Debug, Clone)]
pub struct SysfsResolver {
    sys_root: PathBuf,
    dev_root: PathBuf,
}

impl Default for SysfsResolver {
    fn default() -> Self {
        Self::new("/sys", "/dev")
    }
}

impl SysfsResolver {
    pub fn new(sys_root: impl Into<PathBuf>, dev_root: impl Into<PathBuf>) -> Self {
        Self {
            sys_root: sys_root.into(),
            dev_root: dev_root.into(),
        }
    }

    /// List every hidraw interface backed by a USB device, sorted by name.
    /// A system without the hidraw class has no devices.
    pub fn list_devices(&self) -> Result<Vec<HidrawDevice>> {
        let class_dir = self.sys_root.join("class").join("hidraw");

        let entries = match fs::read_dir(&class_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %class_dir.display(), "no hidraw class directory");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(DiscoveryError::Io {
                    path: class_dir,
                    source,
                })
            }
        };

        let mut entries = entries
            .collect::<io::Result<Vec<_>>>()
            .map_err(|source| DiscoveryError::Io {
                path: class_dir.clone(),
                source,
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut devices = Vec::new();
        for entry in entries {
            let sys_path = entry.path();
            let device_link = sys_path.join("device");

            let device_dir = match fs::canonicalize(&device_link) {
                Ok(dir) => dir,
                Err(e) => {
                    warn!(path = %device_link.display(), error = %e, "skipping hidraw entry");
                    continue;
                }
            };

            let Some(id) = usb_parent_id(&device_dir) else {
                debug!(path = %sys_path.display(), "hidraw entry has no USB parent");
                continue;
            };

            devices.push(HidrawDevice {
                node: self.dev_root.join(entry.file_name()),
                sys_path,
                id,
            });
        }

        Ok(devices)
    }
}

impl DeviceResolver for SysfsResolver {
    fn resolve(&self, id: &UsbId) -> Result<Option<PathBuf>> {
        let found = self
            .list_devices()?
            .into_iter()
            .find(|device| id.matches(&device.id.vendor, &device.id.product));

        match found {
            Some(device) => {
                if !device.node.exists() {
                    return Err(DiscoveryError::MissingDeviceNode(device.node));
                }
                info!(device = %id, node = %device.node.display(), "found device");
                Ok(Some(device.node))
            }
            None => Ok(None),
        }
    }
}

/// Walk up from an interface directory to the first ancestor carrying
/// USB `idVendor`/`idProduct` attributes
fn usb_parent_id(device_dir: &Path) -> Option<UsbId> {
    device_dir.ancestors().find_map(|dir| {
        let vendor = fs::read_to_string(dir.join("idVendor")).ok()?;
        let product = fs::read_to_string(dir.join("idProduct")).ok()?;
        Some(UsbId::new(vendor.trim(), product.trim()))
    })
}

/// Resolver for a device node given up front (configuration, tests)
#[derive(Debug, Clone)]
pub struct FixedPathResolver(pub PathBuf);

impl DeviceResolver for FixedPathResolver {
    fn resolve(&self, _id: &UsbId) -> Result<Option<PathBuf>> {
        if self.0.exists() {
            Ok(Some(self.0.clone()))
        } else {
            Ok(None)
        }
    }
}
