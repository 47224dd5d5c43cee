//! Account query helpers

use std::time::Duration;

use pumpcap_core::RpcError;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

use crate::{timed_request, Result};

/// Fetch an account, or None if it does not exist at this commitment
pub async fn get_account(
    client: &RpcClient,
    address: &Pubkey,
    commitment: CommitmentConfig,
    timeout: Duration,
) -> Result<Option<Account>> {
    let response = timed_request(
        &client.url(),
        timeout,
        client.get_account_with_commitment(address, commitment),
    )
    .await?;

    tracing::debug!(
        address = %address,
        slot = response.context.slot,
        found = response.value.is_some(),
        "Fetched account"
    );

    Ok(response.value)
}

/// Fetch the raw data of an account that must exist
pub async fn get_account_data(
    client: &RpcClient,
    address: &Pubkey,
    commitment: CommitmentConfig,
    timeout: Duration,
) -> Result<Vec<u8>> {
    get_account(client, address, commitment, timeout)
        .await?
        .map(|account| account.data)
        .ok_or_else(|| RpcError::AccountNotFound {
            address: address.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    const TIMEOUT: Duration = Duration::from_secs(5);

    /// Read one HTTP request (headers plus content-length body)
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    return;
                }
            }
        }
    }

    /// Serve a single JSON-RPC response on a local port
    async fn serve_json_rpc(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    fn client(url: String) -> RpcClient {
        RpcClient::new_with_timeout_and_commitment(url, TIMEOUT, CommitmentConfig::confirmed())
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_missing_account_is_account_not_found() {
        let url = serve_json_rpc(
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":7},"value":null},"id":1}"#,
        )
        .await;
        let address = Pubkey::new_unique();

        let err = get_account_data(&client(url), &address, CommitmentConfig::confirmed(), TIMEOUT)
            .await
            .unwrap_err();
        match err {
            RpcError::AccountNotFound { address: missing } => {
                assert_eq!(missing, address.to_string())
            }
            other => panic!("Expected AccountNotFound, got: {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_existing_account_returns_data() {
        // "AQID" is base64 for [1, 2, 3]
        let url = serve_json_rpc(
            r#"{"jsonrpc":"2.0","result":{"context":{"slot":7},"value":{"data":["AQID","base64"],"executable":false,"lamports":1461600,"owner":"6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P","rentEpoch":0,"space":3}},"id":1}"#,
        )
        .await;

        let data = get_account_data(
            &client(url),
            &Pubkey::new_unique(),
            CommitmentConfig::confirmed(),
            TIMEOUT,
        )
        .await
        .unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_closed_port_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = get_account(
            &client(url.clone()),
            &Pubkey::new_unique(),
            CommitmentConfig::confirmed(),
            TIMEOUT,
        )
        .await
        .unwrap_err();
        match err {
            RpcError::Unreachable { url: reported } => assert_eq!(reported, url),
            other => panic!("Expected Unreachable, got: {:?}", other),
        }
    }
}
