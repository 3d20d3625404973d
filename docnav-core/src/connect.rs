//! 异步连接对话框
//!
//! 连接在后台任务中进行，进度、结果与自动关闭都以 [`ConnectEvent`] 的形式
//! 送回 UI 的消息队列，由 UI 线程调用 [`ConnectDialog::apply`] 落地。
//! 取消信号只触发一次；触发后所有迟到的事件都被丢弃。

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use docnav_provider::{ConnectionProfile, Gateway, ProviderError, SessionHandle};
use tokio::sync::{mpsc, watch};

/// 连接超时
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// 计时刷新间隔
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);
/// 成功后自动关闭的延迟
pub const DISMISS_DELAY: Duration = Duration::from_millis(500);

/// 连接过程的时间参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectTiming {
    pub timeout: Duration,
    pub tick: Duration,
    pub dismiss_delay: Duration,
}

impl Default for ConnectTiming {
    fn default() -> Self {
        Self {
            timeout: CONNECT_TIMEOUT,
            tick: TICK_INTERVAL,
            dismiss_delay: DISMISS_DELAY,
        }
    }
}

/// 一次性取消标志，可在多个任务间共享
#[derive(Debug, Clone)]
pub struct CancelFlag(Arc<watch::Sender<bool>>);

impl CancelFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self(Arc::new(tx))
    }

    /// 触发取消，仅第一次调用返回 true
    pub fn cancel(&self) -> bool {
        self.0.send_if_modified(|cancelled| {
            if *cancelled {
                false
            } else {
                *cancelled = true;
                true
            }
        })
    }

    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }

    /// 等待取消
    pub async fn cancelled(&self) {
        let mut rx = self.0.subscribe();
        // 发送端由 self 持有，wait_for 不会因通道关闭而返回
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// 后台任务送回 UI 的事件
pub enum ConnectEvent {
    Tick {
        attempt: u64,
        elapsed_secs: u64,
    },
    Finished {
        attempt: u64,
        profile_name: String,
        result: Result<SessionHandle, ProviderError>,
    },
    Dismiss {
        attempt: u64,
    },
}

impl ConnectEvent {
    pub fn attempt(&self) -> u64 {
        match self {
            Self::Tick { attempt, .. }
            | Self::Finished { attempt, .. }
            | Self::Dismiss { attempt } => *attempt,
        }
    }
}

// SessionHandle 没有实现 Debug
impl fmt::Debug for ConnectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tick {
                attempt,
                elapsed_secs,
            } => f
                .debug_struct("Tick")
                .field("attempt", attempt)
                .field("elapsed_secs", elapsed_secs)
                .finish(),
            Self::Finished {
                attempt,
                profile_name,
                result,
            } => f
                .debug_struct("Finished")
                .field("attempt", attempt)
                .field("profile_name", profile_name)
                .field("ok", &result.is_ok())
                .finish(),
            Self::Dismiss { attempt } => {
                f.debug_struct("Dismiss").field("attempt", attempt).finish()
            }
        }
    }
}

/// 对话框所处阶段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectPhase {
    Connecting,
    Succeeded,
    Failed(String),
    Cancelled,
}

/// `apply` 的结果，告诉 UI 下一步要做什么
pub enum ConnectUpdate {
    /// 过期或已取消，丢弃
    Ignored,
    Ticked,
    /// 连接成功，调用方应接管会话并加载数据库列表
    Connected {
        profile_name: String,
        session: SessionHandle,
    },
    Failed(ProviderError),
    /// 成功后的延迟已到，关闭对话框
    Dismiss,
}

/// "正在连接" 对话框的状态
#[derive(Debug)]
pub struct ConnectDialog {
    attempt: u64,
    profile_name: String,
    address: String,
    elapsed_secs: u64,
    phase: ConnectPhase,
    cancel: CancelFlag,
}

impl ConnectDialog {
    /// 显示对话框并启动后台连接
    pub fn start<M>(
        gateway: Arc<dyn Gateway>,
        profile: ConnectionProfile,
        attempt: u64,
        timing: ConnectTiming,
        tx: mpsc::UnboundedSender<M>,
    ) -> Self
    where
        M: From<ConnectEvent> + Send + 'static,
    {
        let cancel = CancelFlag::new();
        let settled = CancelFlag::new();

        let dialog = Self {
            attempt,
            profile_name: profile.name.clone(),
            address: profile.address(),
            elapsed_secs: 0,
            phase: ConnectPhase::Connecting,
            cancel: cancel.clone(),
        };

        tokio::spawn(run_ticker(
            attempt,
            timing.tick,
            cancel.clone(),
            settled.clone(),
            tx.clone(),
        ));
        tokio::spawn(run_connect(gateway, profile, attempt, timing, cancel, settled, tx));

        log::info!("Connecting to {} (attempt {attempt})", dialog.profile_name);
        dialog
    }

    /// 取消连接；只在连接中时改变阶段
    pub fn cancel(&mut self) {
        if self.cancel.cancel() {
            log::info!("Connection attempt {} cancelled", self.attempt);
        }
        if self.phase == ConnectPhase::Connecting {
            self.phase = ConnectPhase::Cancelled;
        }
    }

    /// 在 UI 线程上应用后台事件
    pub fn apply(&mut self, event: ConnectEvent) -> ConnectUpdate {
        if event.attempt() != self.attempt || self.cancel.is_cancelled() {
            return ConnectUpdate::Ignored;
        }

        match event {
            ConnectEvent::Tick { elapsed_secs, .. } if self.phase == ConnectPhase::Connecting => {
                self.elapsed_secs = elapsed_secs;
                ConnectUpdate::Ticked
            }
            ConnectEvent::Finished {
                profile_name,
                result,
                ..
            } if self.phase == ConnectPhase::Connecting => match result {
                Ok(session) => {
                    self.phase = ConnectPhase::Succeeded;
                    ConnectUpdate::Connected {
                        profile_name,
                        session,
                    }
                }
                Err(e) => {
                    self.phase = ConnectPhase::Failed(e.to_string());
                    ConnectUpdate::Failed(e)
                }
            },
            ConnectEvent::Dismiss { .. } if self.phase == ConnectPhase::Succeeded => {
                ConnectUpdate::Dismiss
            }
            _ => ConnectUpdate::Ignored,
        }
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn phase(&self) -> &ConnectPhase {
        &self.phase
    }

    pub fn is_connecting(&self) -> bool {
        self.phase == ConnectPhase::Connecting
    }
}

async fn run_ticker<M>(
    attempt: u64,
    tick: Duration,
    cancel: CancelFlag,
    settled: CancelFlag,
    tx: mpsc::UnboundedSender<M>,
) where
    M: From<ConnectEvent> + Send + 'static,
{
    let mut elapsed_secs = 0;
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            () = settled.cancelled() => break,
            () = tokio::time::sleep(tick) => {
                elapsed_secs += 1;
                if tx.send(M::from(ConnectEvent::Tick { attempt, elapsed_secs })).is_err() {
                    break;
                }
            }
        }
    }
}

async fn run_connect<M>(
    gateway: Arc<dyn Gateway>,
    profile: ConnectionProfile,
    attempt: u64,
    timing: ConnectTiming,
    cancel: CancelFlag,
    settled: CancelFlag,
    tx: mpsc::UnboundedSender<M>,
) where
    M: From<ConnectEvent> + Send + 'static,
{
    let outcome = tokio::select! {
        () = cancel.cancelled() => None,
        result = tokio::time::timeout(timing.timeout, gateway.connect(&profile)) => {
            Some(result.unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    backend: gateway.id().to_string(),
                    detail: format!(
                        "no response from {} within {}s",
                        profile.address(),
                        timing.timeout.as_secs()
                    ),
                })
            }))
        }
    };
    settled.cancel();

    // 取消后结果直接丢弃
    let Some(result) = outcome else {
        return;
    };
    if cancel.is_cancelled() {
        return;
    }

    if let Err(e) = &result {
        log::warn!("Connection to {} failed: {e}", profile.name);
    }
    let succeeded = result.is_ok();
    let event = ConnectEvent::Finished {
        attempt,
        profile_name: profile.name.clone(),
        result,
    };
    if tx.send(M::from(event)).is_err() || !succeeded {
        return;
    }

    tokio::time::sleep(timing.dismiss_delay).await;
    let _ = tx.send(M::from(ConnectEvent::Dismiss { attempt }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{profile, MockGateway, MockSession};

    async fn drain(rx: &mut mpsc::UnboundedReceiver<ConnectEvent>) -> Vec<ConnectEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[test]
    fn cancel_flag_fires_once() {
        let flag = CancelFlag::new();
        assert!(!flag.is_cancelled());
        assert!(flag.cancel());
        assert!(!flag.cancel());
        assert!(flag.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn successful_connect_ticks_then_dismisses() {
        let gateway = Arc::new(MockGateway::new().with_delay(Duration::from_millis(2500)));
        let (tx, mut rx) = mpsc::unbounded_channel::<ConnectEvent>();

        let mut dialog = ConnectDialog::start(
            gateway.clone(),
            profile("local"),
            1,
            ConnectTiming::default(),
            tx,
        );
        let events = drain(&mut rx).await;

        let updates: Vec<ConnectUpdate> = events.into_iter().map(|e| dialog.apply(e)).collect();
        assert_eq!(updates.len(), 4);
        assert!(matches!(updates[0], ConnectUpdate::Ticked));
        assert!(matches!(updates[1], ConnectUpdate::Ticked));
        assert!(matches!(
            &updates[2],
            ConnectUpdate::Connected { profile_name, .. } if profile_name == "local"
        ));
        assert!(matches!(updates[3], ConnectUpdate::Dismiss));
        assert_eq!(dialog.elapsed_secs(), 2);
        assert_eq!(dialog.phase(), &ConnectPhase::Succeeded);
        assert_eq!(gateway.connects(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_connect_times_out() {
        let gateway = Arc::new(MockGateway::new().with_delay(Duration::from_secs(30)));
        let (tx, mut rx) = mpsc::unbounded_channel::<ConnectEvent>();
        let timing = ConnectTiming {
            timeout: Duration::from_millis(2500),
            ..ConnectTiming::default()
        };

        let mut dialog = ConnectDialog::start(gateway, profile("slow"), 7, timing, tx);
        let mut last = ConnectUpdate::Ignored;
        for event in drain(&mut rx).await {
            last = dialog.apply(event);
        }

        assert!(matches!(last, ConnectUpdate::Failed(ProviderError::Timeout { .. })));
        assert!(matches!(dialog.phase(), ConnectPhase::Failed(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_connect_waits_for_the_user() {
        let gateway = Arc::new(MockGateway::new().with_failure("connection refused"));
        let (tx, mut rx) = mpsc::unbounded_channel::<ConnectEvent>();

        let mut dialog = ConnectDialog::start(
            gateway.clone(),
            profile("down"),
            2,
            ConnectTiming::default(),
            tx,
        );
        let updates: Vec<ConnectUpdate> = drain(&mut rx)
            .await
            .into_iter()
            .map(|e| dialog.apply(e))
            .collect();

        assert_eq!(updates.len(), 1);
        assert!(matches!(updates[0], ConnectUpdate::Failed(_)));
        assert_eq!(gateway.connects(), 1);
        assert_eq!(
            dialog.phase(),
            &ConnectPhase::Failed("[memory] Connection failed: connection refused".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_late_results() {
        let gateway = Arc::new(MockGateway::new().with_delay(Duration::from_secs(3)));
        let (tx, mut rx) = mpsc::unbounded_channel::<ConnectEvent>();

        let mut dialog =
            ConnectDialog::start(gateway, profile("local"), 3, ConnectTiming::default(), tx);

        let first = rx.recv().await.unwrap();
        assert!(matches!(dialog.apply(first), ConnectUpdate::Ticked));

        dialog.cancel();
        dialog.cancel();
        assert_eq!(dialog.phase(), &ConnectPhase::Cancelled);

        for event in drain(&mut rx).await {
            assert!(matches!(dialog.apply(event), ConnectUpdate::Ignored));
        }

        // 即使连接随后完成，对话框也不会再变化
        let late = ConnectEvent::Finished {
            attempt: 3,
            profile_name: "local".to_string(),
            result: Ok(Arc::new(MockSession::new("local"))),
        };
        assert!(matches!(dialog.apply(late), ConnectUpdate::Ignored));
        assert_eq!(dialog.phase(), &ConnectPhase::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn events_from_other_attempts_are_ignored() {
        let gateway = Arc::new(MockGateway::new().with_delay(Duration::from_secs(5)));
        let (tx, _rx) = mpsc::unbounded_channel::<ConnectEvent>();

        let mut dialog =
            ConnectDialog::start(gateway, profile("local"), 10, ConnectTiming::default(), tx);
        let stale = ConnectEvent::Tick {
            attempt: 9,
            elapsed_secs: 4,
        };

        assert!(matches!(dialog.apply(stale), ConnectUpdate::Ignored));
        assert_eq!(dialog.elapsed_secs(), 0);
        assert!(dialog.is_connecting());
    }
}
