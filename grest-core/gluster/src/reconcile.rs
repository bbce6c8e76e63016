//! 卷拓扑合并
//!
//! `volume info` 给出卷和 brick 的结构（权威来源，决定顺序与存在性），
//! `volume status detail` 只包含可达主机上 brick 的运行时信息。两份结果
//! 通过 `host:path` 键关联，不依赖两者的列表顺序。

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Brick, BrickNode, Volume};

/// 以 brick 标识为键的状态查找表
pub fn build_status_lookup(nodes: Vec<BrickNode>) -> HashMap<String, Brick> {
    nodes
        .into_iter()
        .map(|node| (node.key(), Brick::from(node)))
        .collect()
}

/// 合并状态记录与卷信息
///
/// 在查找表中的 brick 整体替换为状态记录；不在表中的 brick 所在主机
/// 视为不可达，运行时字段填充占位值。只出现在状态输出中的 brick 被忽略。
pub fn reconcile(nodes: Vec<BrickNode>, mut volumes: Vec<Volume>) -> Vec<Volume> {
    let lookup = build_status_lookup(nodes);
    let mut unreachable = 0usize;

    for volume in volumes.iter_mut() {
        for brick in volume.bricks.iter_mut() {
            match lookup.get(&brick.key()) {
                Some(status) => *brick = status.clone(),
                None => {
                    brick.mark_unreachable();
                    unreachable += 1;
                }
            }
        }
        volume.num_bricks = volume.bricks.len() as u32;
    }

    debug!(
        "拓扑合并完成: {} 个卷, 状态记录 {} 条, 不可达 brick {} 个",
        volumes.len(),
        lookup.len(),
        unreachable
    );

    volumes
}
