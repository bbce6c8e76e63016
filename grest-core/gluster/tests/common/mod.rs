//! 测试辅助：按参数返回预设输出的命令运行器

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use grest_executor::{CommandRunner, ExecutorError};

type Reply = std::result::Result<Vec<u8>, ExecutorError>;

/// 预设输出的运行器
///
/// 以去掉 `--mode=script`/`--xml` 前缀后、空格连接的参数为键。
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(self, args: &str, output: &str) -> Self {
        self.set(args, Ok(output.as_bytes().to_vec()));
        self
    }

    pub fn fail(self, args: &str, message: &str) -> Self {
        self.set(args, Err(ExecutorError::CommandFailed(message.to_string())));
        self
    }

    pub fn set(&self, args: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(args.to_string(), reply);
    }

    /// 全部调用（完整参数）
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// 全部调用（去掉前缀标志后以空格连接）
    pub fn commands(&self) -> Vec<String> {
        self.calls().iter().map(|argv| strip_flags(argv)).collect()
    }
}

fn strip_flags(argv: &[String]) -> String {
    argv.iter()
        .filter(|a| *a != "--mode=script" && *a != "--xml")
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, argv: &[String]) -> Reply {
        self.calls.lock().unwrap().push(argv.to_vec());
        let key = strip_flags(argv);
        self.replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(ExecutorError::CommandFailed(format!("unexpected command: {}", key))))
    }
}

pub const POOL_LIST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <opErrno>0</opErrno>
  <opErrstr/>
  <peerStatus>
    <peer><uuid>peer-2</uuid><hostname>node2</hostname><connected>1</connected></peer>
    <peer><uuid>peer-1</uuid><hostname>localhost</hostname><connected>1</connected></peer>
  </peerStatus>
</cliOutput>"#;

pub const POOL_LIST_GROWN: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <peerStatus>
    <peer><uuid>peer-2</uuid><hostname>node2</hostname><connected>1</connected></peer>
    <peer><uuid>peer-3</uuid><hostname>node3</hostname><connected>0</connected></peer>
    <peer><uuid>peer-1</uuid><hostname>localhost</hostname><connected>1</connected></peer>
  </peerStatus>
</cliOutput>"#;

/// 单 brick 卷 gv0 的 info 输出
pub const INFO_ONE_BRICK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <volInfo>
    <volumes>
      <volume>
        <name>gv0</name>
        <id>vol-id-0</id>
        <statusStr>Started</statusStr>
        <brickCount>1</brickCount>
        <distCount>1</distCount>
        <replicaCount>1</replicaCount>
        <typeStr>Distribute</typeStr>
        <transport>0</transport>
        <bricks>
          <brick uuid="peer-1">n1:/data/b1<name>n1:/data/b1</name><hostUuid>peer-1</hostUuid><isArbiter>0</isArbiter></brick>
        </bricks>
        <optCount>1</optCount>
        <options>
          <option><name>nfs.disable</name><value>on</value></option>
        </options>
      </volume>
      <count>1</count>
    </volumes>
  </volInfo>
</cliOutput>"#;

/// 两个卷：gv1(n2:/b2, n1:/b1) 与 gv0(n1:/data/b1)
pub const INFO_TWO_VOLUMES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <volInfo>
    <volumes>
      <volume>
        <name>gv1</name>
        <id>vol-id-1</id>
        <statusStr>Started</statusStr>
        <brickCount>2</brickCount>
        <replicaCount>2</replicaCount>
        <typeStr>Replicate</typeStr>
        <bricks>
          <brick uuid="peer-2">n2:/b2<name>n2:/b2</name><hostUuid>peer-2</hostUuid></brick>
          <brick uuid="peer-1">n1:/b1<name>n1:/b1</name><hostUuid>peer-1</hostUuid></brick>
        </bricks>
      </volume>
      <volume>
        <name>gv0</name>
        <id>vol-id-0</id>
        <statusStr>Started</statusStr>
        <brickCount>1</brickCount>
        <typeStr>Distribute</typeStr>
        <bricks>
          <brick uuid="peer-1">n1:/data/b1<name>n1:/data/b1</name><hostUuid>peer-1</hostUuid></brick>
        </bricks>
      </volume>
      <count>2</count>
    </volumes>
  </volInfo>
</cliOutput>"#;

/// n1:/data/b1 在线，pid 123
pub const STATUS_ONE_BRICK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <volStatus>
    <volumes>
      <volume>
        <volName>gv0</volName>
        <nodeCount>1</nodeCount>
        <node>
          <hostname>n1</hostname>
          <path>/data/b1</path>
          <peerid>peer-1</peerid>
          <status>1</status>
          <port>49152</port>
          <ports><tcp>49152</tcp><rdma>N/A</rdma></ports>
          <pid>123</pid>
          <sizeTotal>1000</sizeTotal>
          <sizeFree>500</sizeFree>
          <device>/dev/vdb1</device>
          <blockSize>4096</blockSize>
          <mntOptions>rw,relatime</mntOptions>
          <fsName>xfs</fsName>
        </node>
        <tasks/>
      </volume>
    </volumes>
  </volStatus>
</cliOutput>"#;

/// 所有主机不可达
pub const STATUS_EMPTY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <volStatus>
    <volumes/>
  </volStatus>
</cliOutput>"#;

/// 状态输出顺序与 info 相反：n1:/data/b1、n1:/b1、n2:/b2
pub const STATUS_ALL_REVERSED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <volStatus>
    <volumes>
      <volume>
        <volName>gv0</volName>
        <node>
          <hostname>n1</hostname><path>/data/b1</path><peerid>peer-1</peerid><status>1</status>
          <ports><tcp>49153</tcp><rdma>N/A</rdma></ports><pid>300</pid>
          <sizeTotal>1</sizeTotal><sizeFree>1</sizeFree><device>/dev/a</device>
          <blockSize>4096</blockSize><mntOptions>rw</mntOptions><fsName>xfs</fsName>
        </node>
      </volume>
      <volume>
        <volName>gv1</volName>
        <node>
          <hostname>n1</hostname><path>/b1</path><peerid>peer-1</peerid><status>1</status>
          <ports><tcp>49154</tcp><rdma>N/A</rdma></ports><pid>101</pid>
          <sizeTotal>1</sizeTotal><sizeFree>1</sizeFree><device>/dev/b</device>
          <blockSize>4096</blockSize><mntOptions>rw</mntOptions><fsName>xfs</fsName>
        </node>
        <node>
          <hostname>n2</hostname><path>/b2</path><peerid>peer-2</peerid><status>1</status>
          <ports><tcp>49155</tcp><rdma>N/A</rdma></ports><pid>202</pid>
          <sizeTotal>1</sizeTotal><sizeFree>1</sizeFree><device>/dev/c</device>
          <blockSize>4096</blockSize><mntOptions>rw</mntOptions><fsName>ext4</fsName>
        </node>
      </volume>
    </volumes>
  </volStatus>
</cliOutput>"#;

pub const VOLUME_LIST: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cliOutput>
  <opRet>0</opRet>
  <volList><count>2</count><volume>gv0</volume><volume>gv1</volume></volList>
</cliOutput>"#;
