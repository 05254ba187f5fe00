//! Process tree sampling with sysinfo
//!
//! The recorder measures a command together with every process it spawns:
//! the tree rooted at the command's pid is found by walking parent links,
//! then CPU and resident memory are summed over it.

use std::collections::{HashMap, HashSet};
use std::iter::Sum;
use std::ops::Add;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, ThreadKind};

/// CPU and memory use of one process or a sum over several
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuRamUsage {
    /// Percent of one core (may exceed 100 on multi-core machines)
    pub cpu_percent: f32,
    /// Resident set size in bytes
    pub memory_bytes: u64,
}

impl Add for CpuRamUsage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        CpuRamUsage {
            cpu_percent: self.cpu_percent + other.cpu_percent,
            memory_bytes: self.memory_bytes + other.memory_bytes,
        }
    }
}

impl Sum for CpuRamUsage {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(CpuRamUsage::default(), Add::add)
    }
}

/// `root` and all of its descendants, given (pid, parent) links
pub fn collect_tree<I>(root: Pid, links: I) -> HashSet<Pid>
where
    I: IntoIterator<Item = (Pid, Option<Pid>)>,
{
    let mut children: HashMap<Pid, Vec<Pid>> = HashMap::new();
    for (pid, parent) in links {
        if let Some(parent) = parent {
            children.entry(parent).or_default().push(pid);
        }
    }

    let mut to_visit = vec![root];
    let mut tree = HashSet::new();

    while let Some(pid) = to_visit.pop() {
        if tree.insert(pid) {
            if let Some(kids) = children.get(&pid) {
                to_visit.extend(kids.iter().copied());
            }
        }
    }

    tree
}

/// sysinfo wrapper used by the recorder
pub struct ProcessSampler {
    sys: System,
}

impl ProcessSampler {
    pub fn new() -> Self {
        let mut sampler = Self { sys: System::new() };
        sampler.sys.refresh_memory();
        sampler.refresh();
        sampler
    }

    /// Refresh CPU and memory figures of every process
    ///
    /// CPU usage is computed against the previous refresh, so the first
    /// figures are only meaningful after a second call.
    pub fn refresh(&mut self) {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
    }

    /// Total system memory in bytes
    pub fn total_memory(&self) -> u64 {
        self.sys.total_memory()
    }

    /// Whether `pid` was present at the last refresh
    pub fn is_alive(&self, pid: Pid) -> bool {
        self.sys.process(pid).is_some()
    }

    /// Pids of the tree rooted at `root`, as of the last refresh
    ///
    /// Userland threads show up as processes of their own on some platforms;
    /// they are left out so their usage is not counted twice.
    pub fn process_tree(&self, root: Pid) -> HashSet<Pid> {
        let links = self
            .sys
            .processes()
            .iter()
            .filter(|(_, proc)| proc.thread_kind() != Some(ThreadKind::Userland))
            .map(|(pid, proc)| (*pid, proc.parent()));

        collect_tree(root, links)
    }

    /// Refresh, then sum CPU and memory over the tree rooted at `root`
    pub fn tree_usage(&mut self, root: Pid) -> CpuRamUsage {
        self.refresh();
        let tree = self.process_tree(root);
        log::trace!("Descendants of {}: {:?}", root, tree);

        tree.iter()
            .filter_map(|pid| self.sys.process(*pid))
            .map(|proc| {
                let usage = CpuRamUsage {
                    cpu_percent: proc.cpu_usage(),
                    memory_bytes: proc.memory(),
                };
                log::debug!("{} -> {:?}", proc.pid(), usage);
                usage
            })
            .sum()
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}
