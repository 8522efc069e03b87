//! 训练域核心逻辑
//!
//! 这里是整个系统里真正有推导逻辑的部分，全部是纯函数：
//!
//! - [`stage`] - 阶段同步：由课程进度推导成员的 stage_role
//! - [`reminder`] - 催训计算：距上次训练天数 vs 阈值
//! - [`reorder`] - 课程重排：阶段内 code/顺序连续重编号
//!
//! 持久化由 api/db 层包装，核心逻辑不接触数据库。

pub mod reminder;
pub mod reorder;
pub mod stage;

pub use reminder::{days_until_timeout, days_without_training, effective_timeout};
pub use reorder::renumber_part;
pub use stage::{CatalogParts, SyncPlan, computed_stage, plan_sync};
