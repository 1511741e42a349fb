/*
    Caravel, orbital carrier fleet design
    Copyright (C) 2026 Caravel Developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use snafu::{ResultExt, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file {path}: {source}"))]
    ReadConfig {
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("failed to (de)serialize configuration: {source}"))]
    ParseConfig { source: serde_yaml::Error },
}

/// Trait to specify that a structure can be configured from a YAML file or string.
pub trait ConfigRepr: Serialize + DeserializeOwned {
    /// Builds this configuration from the YAML file at the provided path.
    fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let file = File::open(path).context(ReadConfigSnafu { path: path_str })?;
        serde_yaml::from_reader(BufReader::new(file)).context(ParseConfigSnafu)
    }

    /// Builds this configuration from the provided YAML string.
    fn loads(data: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(data).context(ParseConfigSnafu)
    }

    /// Serializes this configuration to a YAML string.
    fn dumps(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).context(ParseConfigSnafu)
    }
}
