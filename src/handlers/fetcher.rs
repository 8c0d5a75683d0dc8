use async_trait::async_trait;
use std::net::ToSocketAddrs;
use std::time::Duration;
use suppaftp::{types::FileType, FtpError, FtpStream, Status};
use tracing::{debug, info};

use crate::{
    models::{
        error::{Error, Result},
        leaderboard::LeaderboardDocument,
    },
    utils::config::Config,
};

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `Ok(None)` when the store reports that the file does not exist.
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>>;

    async fn write_file(&self, path: &str, contents: Vec<u8>) -> Result<()>;
}

pub struct FtpStore {
    host: String,
    user: String,
    pass: String,
    timeout: Duration,
}

impl FtpStore {
    pub fn new(host: &str, user: &str, pass: &str, timeout: Duration) -> Self {
        Self {
            host: host.to_string(),
            user: user.to_string(),
            pass: pass.to_string(),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.ftp_host,
            &config.ftp_user,
            &config.ftp_pass,
            Duration::from_secs(config.ftp_timeout_secs),
        )
    }

    fn address(&self) -> String {
        let has_port = self
            .host
            .rsplit_once(':')
            .is_some_and(|(_, port)| port.parse::<u16>().is_ok());
        if has_port {
            self.host.clone()
        } else {
            format!("{}:21", self.host)
        }
    }

    /// Opens a session, runs `op`, and quits. The session never outlives the call.
    async fn with_session<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut FtpStream) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let address = self.address();
        let user = self.user.clone();
        let pass = self.pass.clone();
        let timeout = self.timeout;

        tokio::task::spawn_blocking(move || {
            debug!(%address, "opening ftp session");
            let socket_addr = address
                .to_socket_addrs()?
                .next()
                .ok_or_else(|| Error::Transfer(format!("{address} did not resolve")))?;
            let mut ftp = FtpStream::connect_timeout(socket_addr, timeout)?;
            ftp.get_ref().set_read_timeout(Some(timeout))?;
            ftp.get_ref().set_write_timeout(Some(timeout))?;
            ftp.login(user.as_str(), pass.as_str())
                .map_err(|err| Error::Transfer(format!("ftp login failed: {err}")))?;
            ftp.transfer_type(FileType::Binary)?;

            let result = op(&mut ftp);
            if let Err(err) = ftp.quit() {
                debug!("ftp quit failed: {}", err);
            }
            result
        })
        .await?
    }
}

#[async_trait]
impl RemoteStore for FtpStore {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let path = path.to_string();
        self.with_session(move |ftp| match ftp.retr_as_buffer(&path) {
            Ok(buffer) => Ok(Some(buffer.into_inner())),
            Err(FtpError::UnexpectedResponse(response))
                if matches!(response.status, Status::FileUnavailable) =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        })
        .await
    }

    async fn write_file(&self, path: &str, contents: Vec<u8>) -> Result<()> {
        let path = path.to_string();
        self.with_session(move |ftp| {
            let mut reader = std::io::Cursor::new(contents);
            ftp.put_file(&path, &mut reader)?;
            Ok(())
        })
        .await
    }
}

pub async fn fetch_leaderboard(store: &dyn RemoteStore, path: &str) -> Result<LeaderboardDocument> {
    let bytes = store
        .read_file(path)
        .await?
        .ok_or_else(|| Error::Transfer(format!("{path} not found on the store")))?;
    info!(bytes = bytes.len(), "downloaded {}", path);

    let doc: LeaderboardDocument = serde_json::from_slice(&bytes)?;
    Ok(doc)
}

pub async fn get_saved_ref(store: &dyn RemoteStore, path: &str) -> Result<Option<String>> {
    let Some(bytes) = store.read_file(path).await? else {
        debug!("no saved message ref at {}", path);
        return Ok(None);
    };

    let id = String::from_utf8_lossy(&bytes).trim().to_string();
    if id.is_empty() {
        return Ok(None);
    }
    Ok(Some(id))
}

pub async fn save_ref(store: &dyn RemoteStore, path: &str, id: &str) -> Result<()> {
    store.write_file(path, id.as_bytes().to_vec()).await?;
    info!(message_id = id, "saved message ref to {}", path);
    Ok(())
}
