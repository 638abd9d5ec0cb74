//! 下载器集成测试：全程走本地 Range 文件服务器，覆盖分段下载、断点续传、
//! 整流回退、探测失败、事件顺序与文件名防撞。
//!
//! 测试仅使用领域 API；期望字节直接与服务器载荷比对。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::download::{
    DownloadError, DownloadPhase, ProgressEvent, ResumableDownload, StartEvent,
};
use crate::local_file::IN_PROGRESS_EXTENSION;
use crate::resource::ProbeError;
use crate::tests::{
    load_real_url_optional, random_payload, spawn_file_server, temp_save_dir,
    FileServerOptions,
};

#[tokio::test]
async fn segmented_download_matches_payload() {
    let payload = random_payload(100_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("segmented");

    let outcome = ResumableDownload::new(&server.url("archive.bin"))
        .unwrap()
        .save_dir(&dir)
        .parallel_requests(4)
        .batch_bytes(16_384)
        .send()
        .await
        .expect("分段下载应成功");

    assert_eq!(outcome.total_length, payload.len() as u64);
    assert_eq!(outcome.resumed_from, 0);
    assert_eq!(outcome.written_bytes, payload.len() as u64);
    assert_eq!(outcome.file_path, dir.join("archive.bin"));

    let saved = std::fs::read(&outcome.file_path).unwrap();
    assert_eq!(saved, payload, "落盘字节必须与载荷逐字节一致");

    // 成功后部分文件必须已改名消失
    assert!(!dir.join(format!("archive.{}", IN_PROGRESS_EXTENSION)).exists());
}

#[tokio::test]
async fn resume_after_truncation_is_byte_identical() {
    let payload = random_payload(80_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("resume");

    // 模拟上次中断：部分文件里已有任意长度的前缀
    let prefix_len = 37_113usize;
    std::fs::write(
        dir.join(format!("archive.{}", IN_PROGRESS_EXTENSION)),
        &payload[..prefix_len],
    )
    .unwrap();

    let outcome = ResumableDownload::new(&server.url("archive.bin"))
        .unwrap()
        .save_dir(&dir)
        .parallel_requests(3)
        .batch_bytes(12_288)
        .send()
        .await
        .expect("续传下载应成功");

    assert_eq!(outcome.resumed_from, prefix_len as u64);
    assert_eq!(
        outcome.written_bytes,
        (payload.len() - prefix_len) as u64
    );

    let saved = std::fs::read(dir.join("archive.bin")).unwrap();
    assert_eq!(saved, payload, "续传结果必须与一次性下载逐字节一致");
}

#[tokio::test]
async fn start_event_reports_resume_offset() {
    let payload = random_payload(50_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("start_event");

    let prefix_len = 20_000usize;
    std::fs::write(
        dir.join(format!("data.{}", IN_PROGRESS_EXTENSION)),
        &payload[..prefix_len],
    )
    .unwrap();

    let start_events: Arc<Mutex<Vec<StartEvent>>> =
        Arc::new(Mutex::new(Vec::new()));
    let start_events_c = Arc::clone(&start_events);

    ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .with_on_start_hook(move |event| {
            start_events_c.lock().unwrap().push(event.clone());
        })
        .send()
        .await
        .expect("下载应成功");

    let events = start_events.lock().unwrap();
    assert_eq!(events.len(), 1, "start 事件应恰好发一次");
    assert_eq!(events[0].total_length, payload.len() as u64);
    assert_eq!(events[0].already_transferred, prefix_len as u64);
    assert!(events[0].percentage > 0.0 && events[0].percentage < 100.0);
}

#[tokio::test]
async fn progress_events_are_monotonic_and_bounded() {
    let payload = random_payload(120_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("progress");

    let progress_events: Arc<Mutex<Vec<ProgressEvent>>> =
        Arc::new(Mutex::new(Vec::new()));
    let progress_events_c = Arc::clone(&progress_events);

    ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .parallel_requests(4)
        .batch_bytes(16_384)
        .with_on_progress_hook(move |event| {
            progress_events_c.lock().unwrap().push(event.clone());
        })
        .send()
        .await
        .expect("下载应成功");

    let events = progress_events.lock().unwrap();
    assert!(!events.is_empty(), "progress 至少应触发一次");

    let mut prev = 0u64;
    for event in events.iter() {
        assert!(event.transferred >= prev, "transferred 应单调不减");
        assert!(event.percentage <= 100.0, "百分比不能超过 100");
        prev = event.transferred;
    }
    assert_eq!(
        events.last().map(|e| e.transferred),
        Some(payload.len() as u64),
        "最后一次进度应到达总大小"
    );
}

#[tokio::test]
async fn fallback_streams_when_ranges_unsupported() {
    let payload = random_payload(70_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        accept_ranges: false,
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("fallback");

    let infos: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let infos_c = Arc::clone(&infos);

    let outcome = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .with_on_info_hook(move |message| {
            infos_c.lock().unwrap().push(message.to_string());
        })
        .send()
        .await
        .expect("整流回退下载应成功");

    assert_eq!(outcome.written_bytes, payload.len() as u64);
    assert_eq!(outcome.resumed_from, 0, "整流模式没有续传");

    let saved = std::fs::read(dir.join("data.bin")).unwrap();
    assert_eq!(saved.len() as u64, outcome.total_length);
    assert_eq!(saved, payload);

    assert!(
        infos.lock().unwrap().iter().any(|m| m.contains("整流")),
        "应有回退到整流下载的提示"
    );
}

#[tokio::test]
async fn probe_without_length_aborts_before_any_file_io() {
    let server = spawn_file_server(FileServerOptions {
        payload: random_payload(10_000),
        send_length: false,
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("probe_fail");

    let result = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .send()
        .await;

    assert!(
        matches!(
            result,
            Err(DownloadError::Probe(ProbeError::MissingLength))
        ),
        "拿不到长度必须以探测错误中止"
    );

    // 中止发生在任何文件 I/O 之前，目录必须还是空的
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert!(entries.is_empty(), "不应创建任何部分文件");
}

#[tokio::test]
async fn error_hook_fires_exactly_once_and_phase_is_failed() {
    let server = spawn_file_server(FileServerOptions {
        payload: random_payload(10_000),
        send_length: false,
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("error_hook");

    let error_count = Arc::new(AtomicUsize::new(0));
    let error_count_c = Arc::clone(&error_count);

    let download = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .with_on_error_hook(move |_| {
            error_count_c.fetch_add(1, Ordering::SeqCst);
        });
    let phase = download.phase();

    let result = download.send().await;

    assert!(result.is_err());
    assert_eq!(error_count.load(Ordering::SeqCst), 1, "error 事件恰好一次");
    assert_eq!(phase.get_current(), Some(DownloadPhase::Failed));
}

#[tokio::test]
async fn scrambled_completion_order_still_writes_in_range_order() {
    let payload = random_payload(60_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        // 每个请求随机延迟，批内完成顺序被彻底打乱
        jitter_ms: 40,
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("scrambled");

    let outcome = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .parallel_requests(8)
        .batch_bytes(16_384)
        .send()
        .await
        .expect("乱序完成的分段下载应成功");

    let saved = std::fs::read(&outcome.file_path).unwrap();
    assert_eq!(saved, payload, "拼接必须按区间顺序而不是完成顺序");
}

#[tokio::test]
async fn final_name_collision_gets_version_suffix() {
    let payload = random_payload(30_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("collision");

    // 最终名已被占用
    std::fs::write(dir.join("archive.bin"), b"occupied").unwrap();

    let outcome = ResumableDownload::new(&server.url("archive.bin"))
        .unwrap()
        .save_dir(&dir)
        .send()
        .await
        .expect("撞名时应改用版本号后缀");

    assert_eq!(outcome.file_path, dir.join("archive (1).bin"));
    assert_eq!(std::fs::read(&outcome.file_path).unwrap(), payload);

    // 原文件不能被碰
    assert_eq!(
        std::fs::read(dir.join("archive.bin")).unwrap(),
        b"occupied"
    );
}

#[tokio::test]
async fn complete_partial_skips_fetch_and_finalizes() {
    let payload = random_payload(40_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("complete_partial");

    std::fs::write(
        dir.join(format!("data.{}", IN_PROGRESS_EXTENSION)),
        &payload,
    )
    .unwrap();

    let outcome = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .send()
        .await
        .expect("已完整的部分文件应直接收尾");

    assert_eq!(outcome.resumed_from, payload.len() as u64);
    assert_eq!(outcome.written_bytes, 0, "不应再拉取任何字节");
    assert_eq!(std::fs::read(dir.join("data.bin")).unwrap(), payload);
}

#[tokio::test]
async fn resume_disabled_discards_stale_partial() {
    let payload = random_payload(25_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("no_resume");

    // 部分文件内容是垃圾；resume 关掉后必须整个重新下载
    std::fs::write(
        dir.join(format!("data.{}", IN_PROGRESS_EXTENSION)),
        vec![0u8; 9_000],
    )
    .unwrap();

    let outcome = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .resume(false)
        .send()
        .await
        .expect("关闭续传的下载应成功");

    assert_eq!(outcome.resumed_from, 0);
    assert_eq!(std::fs::read(dir.join("data.bin")).unwrap(), payload);
}

#[tokio::test]
async fn partial_longer_than_total_restarts_from_zero() {
    let payload = random_payload(20_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("shrunk");

    // 远端变短了：部分文件比探测到的总大小还大，游标不可信
    let mut stale = payload.clone();
    stale.extend_from_slice(&random_payload(5_000));
    std::fs::write(
        dir.join(format!("data.{}", IN_PROGRESS_EXTENSION)),
        &stale,
    )
    .unwrap();

    let outcome = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .send()
        .await
        .expect("过期部分文件应被丢弃后重下");

    assert_eq!(outcome.resumed_from, 0);
    assert_eq!(std::fs::read(dir.join("data.bin")).unwrap(), payload);
}

#[tokio::test]
async fn progress_watch_reaches_completion() {
    let payload = random_payload(90_000);
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        ..Default::default()
    })
    .await;
    let dir = temp_save_dir("watch");

    let download = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .parallel_requests(4)
        .batch_bytes(16_384);
    let progress = download.progress();

    download.send().await.expect("下载应成功");

    let last = progress.get_current().expect("进度属性应有值");
    assert_eq!(last.transferred, payload.len() as u64);
    assert_eq!(last.total, payload.len() as u64);
    assert!((last.pct() - 100.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn auth_header_is_sent_on_probe_and_every_range() {
    use base64::Engine;

    use crate::auth::DownloadAuth;

    let payload = random_payload(30_000);
    let token = base64::engine::general_purpose::STANDARD.encode("user:secret");
    let server = spawn_file_server(FileServerOptions {
        payload: payload.clone(),
        required_authorization: Some(format!("Basic {}", token)),
        ..Default::default()
    })
    .await;

    // 无凭证在探测处就被拒
    let dir = temp_save_dir("auth_missing");
    let result = ResumableDownload::new(&server.url("data.bin"))
        .unwrap()
        .save_dir(&dir)
        .send()
        .await;
    assert!(
        matches!(
            result,
            Err(DownloadError::Probe(ProbeError::BadStatus(status)))
                if status == reqwest::StatusCode::UNAUTHORIZED
        ),
        "缺少凭证应以 401 探测错误中止"
    );

    // 带凭证后探测与每个 Range 请求都能通过（服务器逐请求校验）
    let dir = temp_save_dir("auth_ok");
    let auth = DownloadAuth::new("user", "secret").unwrap();
    let outcome = ResumableDownload::with_auth(&server.url("data.bin"), &auth)
        .unwrap()
        .save_dir(&dir)
        .parallel_requests(4)
        .batch_bytes(8_192)
        .send()
        .await
        .expect("带凭证的分段下载应成功");

    assert_eq!(std::fs::read(&outcome.file_path).unwrap(), payload);
}

/// 可选的真实地址下载测试；`src/tests/env/real.env` 缺失时自动跳过。
#[tokio::test]
async fn real_url_download_optional() {
    let Some(url) = load_real_url_optional() else {
        return;
    };
    let dir = temp_save_dir("real");

    let outcome = match ResumableDownload::new(&url)
        .unwrap()
        .save_dir(&dir)
        .send()
        .await
    {
        Ok(o) => o,
        Err(e) => {
            eprintln!("真实地址下载失败（可检查 env）：{}", e);
            return;
        }
    };

    let len = std::fs::metadata(&outcome.file_path).map(|m| m.len()).unwrap_or(0);
    assert_eq!(len, outcome.total_length);
    println!("已保存到: {}，大小 {}", outcome.file_path.display(), len);
}
