use super::{parse_arg, parse_octal, Command, CommandError, Context, Flow};
use nix::sys::stat::{stat, umask, Mode};
use nix::unistd::{chown, mkdir, pipe, Uid};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::os::fd::AsRawFd;
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Thin wrappers over single file-system calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileOp {
    Mkdir,
    Rmdir,
    Chmod,
    Chown,
    Umask,
    Stat,
    Pipe,
    Touch,
    Rename,
}

impl FileOp {
    pub const ALL: [FileOp; 9] = [
        FileOp::Mkdir,
        FileOp::Rmdir,
        FileOp::Chmod,
        FileOp::Chown,
        FileOp::Umask,
        FileOp::Stat,
        FileOp::Pipe,
        FileOp::Touch,
        FileOp::Rename,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FileOp::Mkdir => "mkdir",
            FileOp::Rmdir => "rmdir",
            FileOp::Chmod => "chmod",
            FileOp::Chown => "chown",
            FileOp::Umask => "umask",
            FileOp::Stat => "stat",
            FileOp::Pipe => "pipe",
            FileOp::Touch => "touch",
            FileOp::Rename => "rename",
        }
    }
}

#[derive(Clone, Debug)]
pub struct FileCommand {
    op: FileOp,
}

fn operand<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| CommandError::InvalidArguments(usage.to_string()))
}

impl FileCommand {
    pub fn new(op: FileOp) -> Self {
        Self { op }
    }

    fn chmod(&self, args: &[String]) -> Result<(), CommandError> {
        const USAGE: &str = "usage: chmod <mode> <file>";
        let mode = parse_octal(operand(args, 0, USAGE)?)?;
        let file = operand(args, 1, USAGE)?;
        fs::set_permissions(file, fs::Permissions::from_mode(mode))?;
        Ok(())
    }

    fn chown(&self, args: &[String]) -> Result<(), CommandError> {
        const USAGE: &str = "usage: chown <uid> <file>";
        let uid: u32 = parse_arg(args, 0, USAGE)?;
        let file = operand(args, 1, USAGE)?;
        chown(file, Some(Uid::from_raw(uid)), None)?;
        Ok(())
    }

    fn umask(&self, args: &[String], ctx: &mut Context<'_>) -> Result<(), CommandError> {
        let mask = match args.first() {
            Some(raw) => parse_octal(raw)?,
            None => 0o022,
        };
        let old = umask(Mode::from_bits_truncate(mask));
        writeln!(ctx.out, "Old umask: {:o}", old.bits())?;
        Ok(())
    }

    fn stat(&self, args: &[String], ctx: &mut Context<'_>) -> Result<(), CommandError> {
        let file = operand(args, 0, "missing operand")?;
        let info = stat(file)?;
        writeln!(ctx.out, "File: {}", file)?;
        writeln!(ctx.out, "Size: {} bytes", info.st_size)?;
        writeln!(ctx.out, "Permissions: {:o}", info.st_mode)?;
        writeln!(ctx.out, "Owner UID: {}", info.st_uid)?;
        Ok(())
    }

    fn pipe(&self, ctx: &mut Context<'_>) -> Result<(), CommandError> {
        // both ends close on drop
        let (read, write) = pipe()?;
        writeln!(
            ctx.out,
            "Pipe created: read={}, write={}",
            read.as_raw_fd(),
            write.as_raw_fd()
        )?;
        Ok(())
    }

    fn touch(&self, args: &[String]) -> Result<(), CommandError> {
        let file = operand(args, 0, "missing file operand")?;
        OpenOptions::new()
            .write(true)
            .create(true)
            .mode(0o644)
            .open(file)?;
        Ok(())
    }
}

impl Command for FileCommand {
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, CommandError> {
        match self.op {
            FileOp::Mkdir => {
                let dir = operand(args, 0, "missing operand")?;
                mkdir(dir, Mode::from_bits_truncate(0o755))?;
            }
            FileOp::Rmdir => fs::remove_dir(operand(args, 0, "missing operand")?)?,
            FileOp::Chmod => self.chmod(args)?,
            FileOp::Chown => self.chown(args)?,
            FileOp::Umask => self.umask(args, ctx)?,
            FileOp::Stat => self.stat(args, ctx)?,
            FileOp::Pipe => self.pipe(ctx)?,
            FileOp::Touch => self.touch(args)?,
            FileOp::Rename => {
                const USAGE: &str = "usage: rename <old> <new>";
                fs::rename(operand(args, 0, USAGE)?, operand(args, 1, USAGE)?)?;
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;
    use crate::core::state::SessionState;
    use std::os::unix::fs::MetadataExt;
    use std::path::Path;

    fn s(path: &Path) -> &str {
        path.to_str().unwrap()
    }

    #[test]
    fn test_mkdir_and_rmdir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("made");
        let mut state = SessionState::new();

        assert!(run(&mut state, &["mkdir", s(&dir)]).0.is_ok());
        assert!(dir.is_dir());

        let (result, _) = run(&mut state, &["mkdir", s(&dir)]);
        assert!(matches!(result, Err(CommandError::Sys(nix::errno::Errno::EEXIST))));

        assert!(run(&mut state, &["rmdir", s(&dir)]).0.is_ok());
        assert!(!dir.exists());

        let (result, _) = run(&mut state, &["rmdir", s(&dir)]);
        assert!(matches!(result, Err(CommandError::Io(_))));
    }

    #[test]
    fn test_missing_operands() {
        let mut state = SessionState::new();
        let cases: [&[&str]; 7] = [
            &["mkdir"],
            &["rmdir"],
            &["chmod", "755"],
            &["chown"],
            &["stat"],
            &["touch"],
            &["rename", "only-one"],
        ];
        for line in cases {
            let (result, _) = run(&mut state, line);
            assert!(
                matches!(result, Err(CommandError::InvalidArguments(_))),
                "{:?} should be a usage error",
                line
            );
        }
    }

    #[test]
    fn test_touch_chmod_stat() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("touched");
        let mut state = SessionState::new();

        assert!(run(&mut state, &["touch", s(&file)]).0.is_ok());
        assert!(file.is_file());

        fs::write(&file, "keep").unwrap();
        run(&mut state, &["touch", s(&file)]).0.unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "keep");

        run(&mut state, &["chmod", "600", s(&file)]).0.unwrap();
        assert_eq!(fs::metadata(&file).unwrap().mode() & 0o777, 0o600);

        let (result, _) = run(&mut state, &["chmod", "rwx", s(&file)]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));

        let (_, printed) = run(&mut state, &["stat", s(&file)]);
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines[0], format!("File: {}", s(&file)));
        assert_eq!(lines[1], "Size: 4 bytes");
        assert_eq!(lines[2], "Permissions: 100600");
        assert!(lines[3].starts_with("Owner UID: "));
    }

    #[test]
    fn test_chown_to_self() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("owned");
        fs::write(&file, "").unwrap();
        let uid = nix::unistd::getuid().to_string();

        let mut state = SessionState::new();
        assert!(run(&mut state, &["chown", &uid, s(&file)]).0.is_ok());
    }

    #[test]
    fn test_rename() {
        let tmp = tempfile::tempdir().unwrap();
        let from = tmp.path().join("a");
        let to = tmp.path().join("b");
        fs::write(&from, "x").unwrap();

        let mut state = SessionState::new();
        assert!(run(&mut state, &["rename", s(&from), s(&to)]).0.is_ok());
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "x");
    }

    #[test]
    fn test_stat_missing_file() {
        let mut state = SessionState::new();
        let (result, printed) = run(&mut state, &["stat", "/no/such/file/here"]);
        assert!(matches!(result, Err(CommandError::Sys(nix::errno::Errno::ENOENT))));
        assert!(printed.is_empty());
    }

    #[test]
    fn test_pipe_reports_descriptors() {
        let mut state = SessionState::new();
        let (_, printed) = run(&mut state, &["pipe"]);
        assert!(printed.starts_with("Pipe created: read="));
    }

    #[test]
    fn test_umask_round_trip() {
        let mut state = SessionState::new();
        let (_, first) = run(&mut state, &["umask", "077"]);
        let previous = first.trim().trim_start_matches("Old umask: ").to_string();
        let (_, second) = run(&mut state, &["umask", &previous]);
        assert_eq!(second, "Old umask: 77\n");
    }
}
