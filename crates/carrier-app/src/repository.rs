//! Repository adapters selected from configuration

use tracing::debug;

use carrier_domain::repository::CarrierSource;
use carrier_domain::service::AccountProvisioner;
use carrier_infra::backend::{
    BackendClient, HttpCsvSource, RestCarrierSource, RestIdentityStore, RestProfileStore,
};
use carrier_infra::persistence::FileCarrierSource;
use carrier_types::Result;

use crate::config::{Config, DataSourceKind};

/// Provisioner wired to the hosted identity and profile stores
pub type BackendProvisioner = AccountProvisioner<RestIdentityStore, RestProfileStore>;

/// Open the configured carrier source
pub fn open_carrier_source(config: &Config) -> Result<Box<dyn CarrierSource>> {
    open_carrier_source_as(config, config.data_source)
}

/// Open a carrier source of the given kind, using the rest of `config`
pub fn open_carrier_source_as(
    config: &Config,
    kind: DataSourceKind,
) -> Result<Box<dyn CarrierSource>> {
    let source: Box<dyn CarrierSource> = match kind {
        DataSourceKind::File => Box::new(FileCarrierSource::new(config.dataset_path.clone())),
        DataSourceKind::Http => Box::new(HttpCsvSource::new(
            config.dataset_url()?,
            config.request_timeout(),
        )?),
        DataSourceKind::Backend => Box::new(RestCarrierSource::new(
            open_backend_client(config)?,
            config.carriers_table.as_str(),
        )),
    };
    debug!(source = %source.describe(), "opened carrier source");
    Ok(source)
}

/// Open an authenticated backend client
pub fn open_backend_client(config: &Config) -> Result<BackendClient> {
    BackendClient::new(
        config.backend_url()?,
        config.backend_key()?,
        config.request_timeout(),
    )
}

/// Open the account provisioner against the backend
pub fn open_provisioner(config: &Config) -> Result<BackendProvisioner> {
    let client = open_backend_client(config)?;
    let identity = RestIdentityStore::new(client.clone());
    let profiles = RestProfileStore::new(client, config.profiles_table.as_str());
    Ok(AccountProvisioner::new(identity, profiles).with_email_domain(config.email_domain.as_str()))
}
