use std::sync::Arc;
use std::time::Duration;

use quiz_core::Clock;
use quiz_core::model::QuizDraft;
use services::QuizService;
use session::{PROMPT, Style, serve};
use storage::repository::InMemoryRepository;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

async fn start() -> (std::net::SocketAddr, QuizService, oneshot::Sender<()>) {
    let service = QuizService::new(Clock::default(), Arc::new(InMemoryRepository::new()));
    service
        .create_quiz(QuizDraft::new("2+2", "4"))
        .await
        .unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        let _ = stop_rx.await;
    };
    tokio::spawn(serve(listener, service.clone(), Style::plain(), shutdown));
    (addr, service, stop_tx)
}

async fn read_until_prompt(reader: &mut BufReader<tokio::net::tcp::OwnedReadHalf>) -> String {
    let mut seen = Vec::new();
    while !seen.ends_with(PROMPT.as_bytes()) {
        let byte = reader.read_u8().await.expect("server closed early");
        seen.push(byte);
    }
    String::from_utf8(seen).unwrap()
}

#[tokio::test]
async fn client_runs_commands_over_tcp() {
    let (addr, _service, _stop) = start().await;
    let stream = TcpStream::connect(addr).await.unwrap();
    let (read, mut write) = stream.into_split();
    let mut reader = BufReader::new(read);

    let welcome = read_until_prompt(&mut reader).await;
    assert!(welcome.starts_with("Welcome"));

    write.write_all(b"list\r\n").await.unwrap();
    let listing = read_until_prompt(&mut reader).await;
    assert!(listing.contains(" [1]: 2+2\n"));

    write.write_all(b"test 1\r\n4\r\n").await.unwrap();
    let verdict = read_until_prompt(&mut reader).await;
    assert!(verdict.contains("Your answer is correct."));

    write.write_all(b"quit\n").await.unwrap();
    let mut rest = String::new();
    reader.read_to_string(&mut rest).await.unwrap();
    assert_eq!(rest, "Bye!\n");
}

#[tokio::test]
async fn sessions_are_independent() {
    let (addr, service, _stop) = start().await;

    let first = TcpStream::connect(addr).await.unwrap();
    let (first_read, mut first_write) = first.into_split();
    let mut first_reader = BufReader::new(first_read);
    read_until_prompt(&mut first_reader).await;

    // First client is parked in the middle of a question.
    first_write.write_all(b"test 1\n").await.unwrap();
    let mut question = String::new();
    while !question.ends_with("2+2? ") {
        question.push(char::from(first_reader.read_u8().await.unwrap()));
    }

    let second = TcpStream::connect(addr).await.unwrap();
    let (second_read, mut second_write) = second.into_split();
    let mut second_reader = BufReader::new(second_read);
    read_until_prompt(&mut second_reader).await;
    second_write.write_all(b"delete 1\n").await.unwrap();
    let out = read_until_prompt(&mut second_reader).await;
    assert!(out.contains("Deleted quiz [1]."));
    assert_eq!(service.count_quizzes().await.unwrap(), 0);

    // The parked question still resolves against the record it fetched.
    first_write.write_all(b"4\n").await.unwrap();
    let out = read_until_prompt(&mut first_reader).await;
    assert!(out.contains("Your answer is correct."));
}

#[tokio::test]
async fn shutdown_stops_accepting() {
    let (addr, _service, stop) = start().await;
    stop.send(()).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let refused = match TcpStream::connect(addr).await {
        Err(_) => true,
        Ok(mut stream) => {
            let mut buf = [0_u8; 1];
            matches!(stream.read(&mut buf).await, Ok(0) | Err(_))
        }
    };
    assert!(refused);
}

#[tokio::test]
async fn disconnect_mid_session_leaves_server_running() {
    let (addr, _service, _stop) = start().await;
    {
        let stream = TcpStream::connect(addr).await.unwrap();
        let (read, mut write) = stream.into_split();
        let mut reader = BufReader::new(read);
        read_until_prompt(&mut reader).await;
        // Hang up while the server waits for the question text.
        write.write_all(b"add\n").await.unwrap();
    }

    let stream = TcpStream::connect(addr).await.unwrap();
    let (read, _write) = stream.into_split();
    let mut reader = BufReader::new(read);
    assert!(read_until_prompt(&mut reader).await.starts_with("Welcome"));
}
