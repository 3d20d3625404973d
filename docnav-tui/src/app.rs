//! 应用主循环
//!
//! loop {
//!     terminal.draw(...)              // 渲染 UI
//!     if app.should_quit { break }    // 检查是否应该退出
//!     drain(rx)                       // 后台任务（异步连接）送回的消息，按到达顺序逐条 update
//!     poll_event(100ms)               // 轮询键盘输入
//!     update(app, msg).await          // 更新状态
//! }
//!
//! 所有状态修改都发生在这一个任务里，后台任务只能通过 channel 投递消息。

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

/// 运行应用主循环
pub async fn run(
    terminal: &mut Term,
    app: &mut App,
    mut rx: UnboundedReceiver<AppMessage>,
) -> Result<()> {
    loop {
        // 1. 按终端尺寸更新视口，然后渲染 UI
        let size = terminal.size()?;
        app.resize(size.width, size.height);
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        // 2. 检查是否应该退出
        if app.should_quit {
            break;
        }

        // 3. 处理后台消息
        while let Ok(msg) = rx.try_recv() {
            update::update(app, msg).await;
        }

        // 4. 轮询事件（100ms 超时）
        if let Some(event) = event::poll_event(Duration::from_millis(100))? {
            // 5. 处理事件，获取消息
            let msg = event::handle_event(event, app);

            // 6. 更新状态
            update::update(app, msg).await;
        }
    }

    Ok(())
}
