// src/selection/random.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// 可注入的随机源，用于在合格候选中均匀选择
pub trait RandomSource: Send + Sync {
    /// 返回 `[0, upper)` 内均匀分布的下标，`upper` 必须大于 0
    fn next_index(&self, upper: usize) -> usize;
}

/// 生产环境使用的线程本地随机数生成器
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

/// 固定种子的随机源；同一种子产生同一下标序列
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&self, upper: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..upper)
    }
}
