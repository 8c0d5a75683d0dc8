use async_trait::async_trait;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

use crate::handlers::fetcher::RemoteStore;
use crate::models::error::{Error, Result};

/// In-memory stand-in for the FTP store.
#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
    unreachable: bool,
}

impl MemoryStore {
    pub fn with_file(path: &str, contents: &str) -> Self {
        let store = Self::default();
        store.put(path, contents);
        store
    }

    /// Every call fails as if the server refused the connection.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn put(&self, path: &str, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.as_bytes().to_vec());
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        if self.unreachable {
            return Err(Error::Transfer("connection refused".to_string()));
        }
        Ok(self.files.lock().unwrap().get(path).cloned())
    }

    async fn write_file(&self, path: &str, contents: Vec<u8>) -> Result<()> {
        if self.unreachable {
            return Err(Error::Transfer("connection refused".to_string()));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), contents);
        Ok(())
    }
}

type SharedFiles = Arc<Mutex<HashMap<String, Vec<u8>>>>;

/// Loopback FTP server speaking just enough of the protocol for one session at a time.
/// Missing files answer `550`; with `accept_login` false every `PASS` answers `530`.
pub struct FakeFtpServer {
    address: String,
    files: SharedFiles,
}

impl FakeFtpServer {
    pub fn start(accept_login: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let files: SharedFiles = Arc::default();

        let served = files.clone();
        std::thread::spawn(move || {
            for control in listener.incoming().flatten() {
                let _ = serve_session(control, &served, accept_login);
            }
        });

        Self { address, files }
    }

    pub fn address(&self) -> String {
        self.address.clone()
    }

    pub fn put(&self, path: &str, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.as_bytes().to_vec());
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

fn serve_session(control: TcpStream, files: &SharedFiles, accept_login: bool) -> std::io::Result<()> {
    let mut reader = BufReader::new(control.try_clone()?);
    let mut out = control;
    let mut data: Option<TcpListener> = None;
    write!(out, "220 fake ftp ready\r\n")?;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim_end();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "USER" => write!(out, "331 password required\r\n")?,
            "PASS" if accept_login => write!(out, "230 logged in\r\n")?,
            "PASS" => write!(out, "530 login incorrect\r\n")?,
            "TYPE" => write!(out, "200 type set\r\n")?,
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0")?;
                let port = listener.local_addr()?.port();
                write!(
                    out,
                    "227 Entering Passive Mode (127,0,0,1,{},{})\r\n",
                    port / 256,
                    port % 256
                )?;
                data = Some(listener);
            }
            "EPSV" => {
                let listener = TcpListener::bind("127.0.0.1:0")?;
                let port = listener.local_addr()?.port();
                write!(out, "229 Entering Extended Passive Mode (|||{port}|)\r\n")?;
                data = Some(listener);
            }
            "RETR" => {
                // The client connects to the data port before reading this reply,
                // so the listener stays open on the 550 path.
                let found = files.lock().unwrap().get(arg).cloned();
                match (found, data.as_ref()) {
                    (Some(bytes), Some(listener)) => {
                        write!(out, "150 sending\r\n")?;
                        let (mut conn, _) = listener.accept()?;
                        conn.write_all(&bytes)?;
                        drop(conn);
                        write!(out, "226 transfer complete\r\n")?;
                    }
                    _ => write!(out, "550 {arg}: no such file\r\n")?,
                }
            }
            "STOR" => match data.take() {
                Some(listener) => {
                    write!(out, "150 receiving\r\n")?;
                    let (mut conn, _) = listener.accept()?;
                    let mut bytes = Vec::new();
                    conn.read_to_end(&mut bytes)?;
                    files.lock().unwrap().insert(arg.to_string(), bytes);
                    write!(out, "226 transfer complete\r\n")?;
                }
                None => write!(out, "425 no data connection\r\n")?,
            },
            "QUIT" => {
                write!(out, "221 bye\r\n")?;
                return Ok(());
            }
            _ => write!(out, "502 not implemented\r\n")?,
        }
    }
}
