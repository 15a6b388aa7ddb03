use serde::{Deserialize, Serialize};

use super::{Client, Device, Os};

/// Combined classification of one User-Agent string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Detection {
    pub client: Client,
    pub os: Os,
    pub device: Device,
}

impl Detection {
    pub fn client(&self) -> &Client {
        &self.client
    }
    pub fn os(&self) -> &Os {
        &self.os
    }
    pub fn device(&self) -> &Device {
        &self.device
    }
    pub fn is_spider(&self) -> bool {
        self.client.is_spider()
    }
    pub fn is_mobile(&self) -> bool {
        self.device.is_mobile
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{client: {}, os: {}, device: {}}}",
            self.client, self.os, self.device
        )
    }
}
