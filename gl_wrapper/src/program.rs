use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, CString, NulError};

use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

/// Compiles a vertex and a fragment stage and links them into one [`Program`].
///
/// Compile and link failures are fatal and carry the full driver info log.
pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Result<Self, ProgramError> {
        Ok(Self {
            vert: CString::new(vert_src)?,
            frag: CString::new(frag_src)?,
        })
    }

    pub fn build(self) -> Result<Program, ProgramError> {
        unsafe {
            let vert = compile_stage(gl::VERTEX_SHADER, &self.vert)?;

            let frag = match compile_stage(gl::FRAGMENT_SHADER, &self.frag) {
                Ok(frag) => frag,
                Err(e) => {
                    gl::DeleteShader(vert);
                    return Err(e);
                }
            };

            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            // The stage objects are no longer needed once the link result is known.
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            let mut success: GLint = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
            if success != 1 {
                let log = program_info_log(program);
                gl::DeleteProgram(program);
                return Err(ProgramError::Link { log });
            }

            Ok(Program {
                id: program,
                uniforms: RefCell::new(HashMap::new()),
            })
        }
    }
}

unsafe fn compile_stage(kind: GLenum, src: &CString) -> Result<GLuint, ProgramError> {
    let shader = gl::CreateShader(kind);

    gl::ShaderSource(shader, 1, &src.as_ptr(), std::ptr::null());
    gl::CompileShader(shader);

    let mut success: GLint = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
    if success != 1 {
        let log = shader_info_log(shader);
        gl::DeleteShader(shader);

        let stage = match kind {
            gl::VERTEX_SHADER => "vertex",
            gl::FRAGMENT_SHADER => "fragment",
            _ => "unknown",
        };

        return Err(ProgramError::Compile { stage, log });
    }

    Ok(shader)
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);

    let mut buf = vec![0_u8; len.max(1) as usize];
    gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buf.as_mut_ptr() as *mut c_char);

    trim_log(buf)
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);

    let mut buf = vec![0_u8; len.max(1) as usize];
    gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buf.as_mut_ptr() as *mut c_char);

    trim_log(buf)
}

fn trim_log(mut buf: Vec<u8>) -> String {
    // INFO_LOG_LENGTH counts the trailing NUL.
    if let Some(end) = buf.iter().position(|b| *b == 0) {
        buf.truncate(end);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{stage} shader compilation failed:\n{log}")]
    Compile { stage: &'static str, log: String },
    #[error("program linking failed:\n{log}")]
    Link { log: String },
    #[error("shader source contains an interior NUL byte")]
    Source(#[from] NulError),
}

/// A resolved uniform handle. The driver returns `-1` for names that were
/// optimized out of the program; updates through such a handle are no-ops.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UniformLocation(GLint);

impl UniformLocation {
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

#[derive(Debug)]
pub struct Program {
    id: GLuint,
    uniforms: RefCell<HashMap<String, UniformLocation>>,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Binds this program for subsequent draw calls.
    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) }
    }

    /// Resolves a uniform by name, hitting the driver only on the first lookup.
    pub fn uniform_location(&self, name: &str) -> Result<UniformLocation, NulError> {
        if let Some(location) = self.uniforms.borrow().get(name) {
            return Ok(*location);
        }

        let c_name = CString::new(name)?;
        let location = UniformLocation(unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) });

        self.uniforms.borrow_mut().insert(name.to_owned(), location);

        Ok(location)
    }

    /// The program must be bound when this is called.
    pub fn set_float(&self, location: UniformLocation, value: f32) {
        unsafe { gl::Uniform1f(location.0, value) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}
